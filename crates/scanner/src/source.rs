//! 입력 파일 읽기 (크기 제한 포함)

use std::path::Path;

use crate::error::ScannerError;

/// 파일을 UTF-8 문자열로 읽습니다.
///
/// 파일이 없으면 `Ok(None)`, `max_file_size`를 넘으면 [`ScannerError::FileTooBig`],
/// 그 밖의 I/O 실패는 [`ScannerError::ReadFailure`]를 반환합니다.
pub(crate) fn read_limited(path: &Path, max_file_size: usize) -> Result<Option<String>, ScannerError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ScannerError::ReadFailure {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > max_file_size {
        return Err(ScannerError::FileTooBig {
            path: path.display().to_string(),
            size,
            max: max_file_size,
        });
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| ScannerError::ReadFailure {
            path: path.display().to_string(),
            source: e,
        })
}
