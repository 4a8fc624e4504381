use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 建立 Ctrl-C 中斷旗標
///
/// 執行中的引擎指令會輪詢並清除此旗標（只取消該指令）；
/// 沒有工作在執行時，主選單看到旗標就結束程式。
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    if let Err(e) = ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，正在中斷目前的工作...");
    }) {
        warn!("無法設定 Ctrl-C 處理器: {e}");
    }

    shutdown_signal
}
