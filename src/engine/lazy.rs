use super::{EngineError, Transcoder};
use log::info;

type Factory<E> = Box<dyn Fn() -> E + Send + Sync>;

/// 每個元件各自持有一個延遲建立的引擎
///
/// 第一次使用時建立並載入，之後重複使用同一個實例，不會重建。
/// 載入失敗時不保留實例，下次呼叫會重試。
pub struct LazyEngine<E> {
    engine: Option<E>,
    factory: Factory<E>,
}

impl<E: Transcoder> LazyEngine<E> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        Self {
            engine: None,
            factory: Box::new(factory),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn ensure_loaded(&mut self) -> Result<&mut E, EngineError> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => {
                let mut engine = (self.factory)();
                engine.load()?;
                info!("轉檔引擎初始化完成");
                engine
            }
        };
        Ok(self.engine.insert(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEngine {
        loaded: bool,
        fail_load: bool,
    }

    impl Transcoder for CountingEngine {
        fn load(&mut self) -> Result<(), EngineError> {
            if self.fail_load {
                return Err(EngineError::Load {
                    reason: "wasm missing".to_string(),
                });
            }
            self.loaded = true;
            Ok(())
        }

        fn is_loaded(&self) -> bool {
            self.loaded
        }

        fn write_file(&mut self, _name: &str, _data: &[u8]) -> Result<(), EngineError> {
            Ok(())
        }

        fn exec(&mut self, _args: &[String]) -> Result<(), EngineError> {
            Ok(())
        }

        fn read_file(&mut self, _name: &str) -> Result<Vec<u8>, EngineError> {
            Ok(Vec::new())
        }

        fn delete_file(&mut self, _name: &str) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn test_engine_is_built_once() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let mut lazy = LazyEngine::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            CountingEngine {
                loaded: false,
                fail_load: false,
            }
        });

        assert!(!lazy.is_ready());
        assert!(lazy.ensure_loaded().unwrap().is_loaded());
        assert!(lazy.ensure_loaded().unwrap().is_loaded());
        assert!(lazy.is_ready());
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let mut lazy = LazyEngine::new(move || CountingEngine {
            loaded: false,
            fail_load: counter.fetch_add(1, Ordering::SeqCst) == 0,
        });

        assert!(matches!(lazy.ensure_loaded(), Err(EngineError::Load { .. })));
        assert!(!lazy.is_ready());
        assert!(lazy.ensure_loaded().is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
