//! 各編輯功能傳給引擎的參數列表

/// 合併清單在引擎暫存空間中的檔名
pub const CONCAT_MANIFEST: &str = "file_list.txt";

/// 預覽片段固定長度（秒）
pub const PREVIEW_DURATION_SECS: f64 = 3.0;

/// 重新編碼視訊時使用的 libx264 參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub preset: String,
    pub crf: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            preset: "fast".to_string(),
            crf: 23,
        }
    }
}

impl EncodeOptions {
    fn video_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
        ]
    }
}

/// 秒數轉為參數字串，最多保留到毫秒並去除多餘的 0
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    let text = format!("{seconds:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// concat demuxer 清單，每行一個 `file '<name>'`，依上傳順序排列
#[must_use]
pub fn concat_manifest(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("file '{}'\n", name.replace('\'', "'\\''")))
        .collect()
}

/// 合併：視訊重新編碼，音訊直接複製
#[must_use]
pub fn concat_args(manifest: &str, output: &str, encode: &EncodeOptions) -> Vec<String> {
    let mut args: Vec<String> = ["-f", "concat", "-safe", "0", "-i", manifest]
        .iter()
        .map(ToString::to_string)
        .collect();
    args.extend(encode.video_args());
    args.extend(["-c:a".to_string(), "copy".to_string(), output.to_string()]);
    args
}

/// 在指定時間點擷取單張影格
#[must_use]
pub fn frame_args(input: &str, timestamp: f64, output: &str) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string(),
        "-ss".to_string(),
        format_seconds(timestamp),
        "-frames:v".to_string(),
        "1".to_string(),
        "-q:v".to_string(),
        "2".to_string(),
        output.to_string(),
    ]
}

/// 剪輯：`-ss` 放在 `-i` 前做快速定位，`-t` 為片段長度
#[must_use]
pub fn trim_args(
    input: &str,
    start: f64,
    duration: f64,
    output: &str,
    encode: &EncodeOptions,
) -> Vec<String> {
    let mut args = vec![
        "-ss".to_string(),
        format_seconds(start),
        "-i".to_string(),
        input.to_string(),
        "-t".to_string(),
        format_seconds(duration),
    ];
    args.extend(encode.video_args());
    args.extend(["-c:a".to_string(), "copy".to_string(), output.to_string()]);
    args
}

/// 預覽片段：轉成 WebM（VP8 + Vorbis）
#[must_use]
pub fn preview_args(input: &str, start: f64, duration: f64, output: &str) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string(),
        "-ss".to_string(),
        format_seconds(start),
        "-t".to_string(),
        format_seconds(duration),
        "-vcodec".to_string(),
        "libvpx".to_string(),
        "-acodec".to_string(),
        "libvorbis".to_string(),
        output.to_string(),
    ]
}
