use anyhow::Result;
use std::sync::Arc;

pub type HandlerResult = Result<()>;
pub type Db<K, T> = Arc<scc::HashMap<K, T>>;
