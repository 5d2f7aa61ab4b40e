use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingMemoryConfig {
    pub capacity: usize,
}

impl Default for WorkingMemoryConfig {
    fn default() -> Self {
        Self { capacity: 7 }
    }
}
