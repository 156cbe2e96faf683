//! 기반 정의를 읽을 수 없을 때 사용하는 공통 속성 목록

/// 큐레이션된 공통 속성 목록 (정렬 전)
#[rustfmt::skip]
pub const FALLBACK_PROPERTIES: &[&str] = &[
    // 크기
    "width", "height", "size", "constraintSize",
    "layoutWeight", "flexGrow", "flexShrink", "flexBasis",
    "aspectRatio", "displayPriority",
    // 위치
    "position", "offset", "markAnchor", "align",
    "alignRules", "alignSelf", "margin", "padding",
    // 배경/전경
    "backgroundColor", "foregroundColor",
    "background", "backgroundImage", "backgroundImageSize",
    "backgroundImagePosition", "backgroundImageResizable",
    "backgroundBlurStyle", "backgroundEffect", "backgroundFilter",
    "foregroundEffect", "foregroundFilter", "foregroundBlurStyle",
    // 테두리
    "border", "borderWidth", "borderColor", "borderStyle",
    "borderRadius", "borderImage",
    "outline", "outlineColor", "outlineStyle", "outlineWidth", "outlineRadius",
    // 표시
    "opacity", "visibility", "display", "overlay",
    "blur", "backdropBlur", "motionBlur", "linearGradientBlur",
    // 필터/효과
    "brightness", "contrast", "saturate", "grayscale", "invert", "sepia",
    "hueRotate", "colorBlend", "blendMode", "advancedBlendMode",
    "shadow", "compositingFilter", "materialFilter",
    "visualEffect", "systemBarEffect",
    // 그라디언트
    "linearGradient", "radialGradient", "sweepGradient",
    // 변환
    "transform", "transform3D", "rotate", "scale", "translate",
    "geometryTransition", "motionPath",
    // 클리핑
    "clip", "clipShape", "mask", "maskShape",
    // 애니메이션
    "animation", "transition", "sharedTransition", "useEffect",
    "useUnionEffect", "useShadowBatching", "freeze",
    // 이벤트
    "onClick", "onAppear", "onDisAppear", "onAttach", "onDetach",
    "onTouch", "onHover", "onHoverMove", "onMouse", "onKeyEvent",
    "onKeyEventDispatch", "onKeyPreIme", "onFocus", "onBlur",
    "onDragStart", "onDragMove", "onDragEnd", "onDragEnter", "onDragLeave",
    "onDrop", "onPreDrag", "onAreaChange", "onAxisEvent", "onFocusAxisEvent",
    "onDigitalCrown", "onAccessibilityHover", "onAccessibilityHoverTransparent",
    // 포커스
    "focusable", "defaultFocus", "nextFocus", "tabIndex", "tabStop",
    "focusOnTouch", "focusBox", "focusScopeId", "focusScopePriority",
    "groupDefaultFocus",
    // 드래그 앤 드롭
    "draggable", "allowDrop", "dragPreview", "dragPreviewOptions",
    // 스크롤
    "scrollable", "scrollBar", "scrollBarColor", "scrollBarWidth",
    "edgeEffect", "gridOffset", "gridSpan",
    // 렌더링
    "renderGroup", "excludeFromRenderGroup", "clickEffect", "hoverEffect",
    "pixelRound", "pixelRoundEffect",
    // 상호작용
    "hitTestBehavior", "responseRegion", "responseRegionList",
    "mouseResponseRegion", "touchable", "enabled",
    // 안전 영역
    "expandSafeArea", "ignoreLayoutSafeArea", "safeAreaPadding",
    // 레이아웃
    "direction", "layoutGravity", "chainMode", "chainWeight",
    // 식별자
    "id", "key", "tag", "group",
    // 기타
    "zIndex", "customProperty", "drawModifier", "bindPopup", "bindTips",
    "enableClickSoundEffect", "useSizeType", "toolbar",
];
