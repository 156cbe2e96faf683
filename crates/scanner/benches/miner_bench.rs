//! 부정 근거 수집기 벤치마크
//!
//! 규칙 컴파일, 문서 본문 매칭, 공통 기반 블록 추출 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use propmatrix_scanner::EvidenceMiner;
use propmatrix_scanner::property::find_block_body;

const DOC_PARAGRAPH: &str = "## 属性

除支持通用属性外，还支持以下属性：

| 名称 | 说明 |
| ---- | ---- |
| blur | 不支持 |

Span 不支持 border 属性。设置 opacity 不生效。当组件处于禁用状态时，hoverEffect 不生效。
The clip attribute is not supported. Setting margin has no effect.
以下属性不支持：mask、shadow、sweepGradient

";

/// 문단 `n`개로 이루어진 문서
fn generate_doc(paragraphs: usize) -> String {
    let mut doc = String::from("# Span\n\n");
    for _ in 0..paragraphs {
        doc.push_str(DOC_PARAGRAPH);
    }
    doc
}

fn generate_common_dts(methods: usize) -> String {
    let mut content = String::from("declare class CommonMethod<T> {\n");
    for i in 0..methods {
        content.push_str(&format!(
            "  method{i}(value: {{ inner: {{ depth: number }} }}): T;\n"
        ));
    }
    content.push_str("}\n");
    content
}

fn bench_rule_compilation(c: &mut Criterion) {
    c.bench_function("miner_new", |b| b.iter(|| EvidenceMiner::new().unwrap()));
}

fn bench_mine_text(c: &mut Criterion) {
    let miner = EvidenceMiner::new().unwrap();
    let doc = generate_doc(10);

    let mut group = c.benchmark_group("mine_text");
    group.throughput(Throughput::Bytes(doc.len() as u64));
    group.bench_function("paragraphs_10", |b| {
        b.iter(|| miner.mine_text(black_box(&doc)))
    });
    group.finish();
}

fn bench_mine_text_scaling(c: &mut Criterion) {
    let miner = EvidenceMiner::new().unwrap();

    let mut group = c.benchmark_group("mine_text_scaling");
    for size in [1, 10, 100].iter() {
        let doc = generate_doc(*size);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| miner.mine_text(black_box(&doc)))
        });
    }
    group.finish();
}

fn bench_block_body(c: &mut Criterion) {
    let content = generate_common_dts(200);

    let mut group = c.benchmark_group("find_block_body");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("methods_200", |b| {
        b.iter(|| find_block_body(black_box(&content), "declare class CommonMethod"))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rule_compilation,
    bench_mine_text,
    bench_mine_text_scaling,
    bench_block_body
);
criterion_main!(benches);
