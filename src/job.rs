//! 每個元件同時只允許一個處理中的工作
//!
//! 主要動作本身會檢查並設定狀態，不依賴介面是否停用按鈕。

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Default)]
pub struct JobGate {
    state: Mutex<JobState>,
}

impl JobGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> JobState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == JobState::Running
    }

    /// 嘗試進入 Running；已有工作執行中時回傳 `None`
    #[must_use]
    pub fn try_begin(&self) -> Option<JobGuard<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == JobState::Running {
            return None;
        }
        *state = JobState::Running;
        Some(JobGuard {
            gate: self,
            finished: false,
        })
    }

    fn set(&self, next: JobState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

/// 工作進行中的憑證；未明確結束就被 drop（例如 panic）時視為失敗
#[derive(Debug)]
pub struct JobGuard<'a> {
    gate: &'a JobGate,
    finished: bool,
}

impl JobGuard<'_> {
    pub fn finish<T, E>(mut self, result: &Result<T, E>) {
        let next = if result.is_ok() {
            JobState::Completed
        } else {
            JobState::Failed
        };
        self.gate.set(next);
        self.finished = true;
    }
}

impl Drop for JobGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.gate.set(JobState::Failed);
        }
    }
}
