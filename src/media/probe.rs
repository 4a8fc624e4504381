use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 影片基本資訊，剪輯範圍與預覽起點以 `duration_seconds` 為上限
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub duration_seconds: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
}

impl MediaInfo {
    /// 寬高都取得且不為 0 時才回傳
    pub fn resolution(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn probe_media(ffprobe_path: &str, path: &Path) -> Result<MediaInfo> {
    let output = Command::new(ffprobe_path)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {}", stderr.trim());
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("無法解析 ffprobe 輸出: {}", path.display()))
}

fn parse_probe_output(json: &str) -> Result<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json)?;

    let video_stream = probe.streams.as_ref().and_then(|streams| {
        streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
    });

    // 影片長度優先取 format，其次取視訊串流
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or_else(|| video_stream.and_then(|s| s.duration.as_ref()))
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| anyhow::anyhow!("無法取得影片長度"))?;

    Ok(MediaInfo {
        duration_seconds,
        width: video_stream.and_then(|s| s.width),
        height: video_stream.and_then(|s| s.height),
        frame_rate: video_stream
            .and_then(|s| s.r_frame_rate.as_deref())
            .and_then(parse_frame_rate),
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den > 0.0 && num > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate.parse().ok().filter(|r: &f64| r.is_finite() && *r > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_invalid() {
        assert!(parse_frame_rate("invalid").is_none());
        assert!(parse_frame_rate("30/0").is_none());
        // 部分串流回報 0/0
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_parse_probe_output_prefers_format_duration() {
        let json = r#"{
            "format": { "duration": "10.010000" },
            "streams": [
                { "codec_type": "audio", "duration": "9.98" },
                { "codec_type": "video", "width": 640, "height": 360,
                  "r_frame_rate": "25/1", "duration": "10.000000" }
            ]
        }"#;
        let info = parse_probe_output(json).unwrap();
        assert!((info.duration_seconds - 10.01).abs() < 1e-6);
        assert_eq!(info.width, Some(640));
        assert_eq!(info.height, Some(360));
        assert!((info.frame_rate.unwrap() - 25.0).abs() < 1e-6);
        assert_eq!(info.resolution(), Some((640, 360)));
    }

    #[test]
    fn test_resolution_requires_both_dimensions() {
        let json = r#"{ "format": { "duration": "3" },
            "streams": [ { "codec_type": "video", "width": 1280, "r_frame_rate": "0/0" } ] }"#;
        let info = parse_probe_output(json).unwrap();
        assert!(info.resolution().is_none());
        assert!(info.frame_rate.is_none());
    }

    #[test]
    fn test_parse_probe_output_falls_back_to_stream_duration() {
        let json = r#"{ "streams": [ { "codec_type": "video", "duration": "4.5" } ] }"#;
        let info = parse_probe_output(json).unwrap();
        assert!((info.duration_seconds - 4.5).abs() < 1e-6);
        assert!(info.width.is_none());
        assert!(info.resolution().is_none());
    }

    #[test]
    fn test_parse_probe_output_without_duration_fails() {
        assert!(parse_probe_output(r#"{ "streams": [] }"#).is_err());
    }
}
