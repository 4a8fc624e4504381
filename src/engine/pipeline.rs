use super::{EngineError, Transcoder};
use log::{debug, error, info, warn};

/// 要寫入引擎暫存空間的輸入檔
#[derive(Debug, Clone)]
pub struct StagedInput {
    pub name: String,
    pub data: Vec<u8>,
}

impl StagedInput {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// 一次引擎呼叫：寫入輸入 -> 執行參數列表 -> 讀回輸出
#[derive(Debug, Clone)]
pub struct EngineJob {
    pub inputs: Vec<StagedInput>,
    pub args: Vec<String>,
    pub output: String,
}

/// 執行一次引擎工作並回傳輸出檔內容
///
/// 不論成功與否，已寫入的輸入檔與輸出檔都會被刪除；
/// 清理失敗只記錄警告，不影響結果。
pub fn run_job<E: Transcoder + ?Sized>(engine: &mut E, job: &EngineJob) -> Result<Vec<u8>, EngineError> {
    let mut staged: Vec<&str> = Vec::with_capacity(job.inputs.len());
    let mut exec_attempted = false;

    let result = run_stages(engine, job, &mut staged, &mut exec_attempted);

    if exec_attempted {
        staged.push(&job.output);
    }
    for name in staged {
        if let Err(e) = engine.delete_file(name) {
            warn!("暫存檔清理失敗: {e}");
        }
    }

    match &result {
        Ok(data) => info!("引擎輸出 {} 完成 ({} bytes)", job.output, data.len()),
        Err(e) => error!("引擎工作失敗 [{}]: {e}", e.stage()),
    }

    result
}

fn run_stages<'a, E: Transcoder + ?Sized>(
    engine: &mut E,
    job: &'a EngineJob,
    staged: &mut Vec<&'a str>,
    exec_attempted: &mut bool,
) -> Result<Vec<u8>, EngineError> {
    for input in &job.inputs {
        engine.write_file(&input.name, &input.data)?;
        staged.push(&input.name);
    }
    debug!("已寫入 {} 個輸入檔", staged.len());

    *exec_attempted = true;
    engine.exec(&job.args)?;

    let data = engine.read_file(&job.output)?;
    if data.is_empty() {
        return Err(EngineError::Read {
            name: job.output.clone(),
            reason: "輸出檔案為空".to_string(),
        });
    }
    Ok(data)
}
