use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultiClusterSection {
    /// Plugin block in Corefile syntax.
    #[serde(default = "default_stanza")]
    pub stanza: String,
}

impl Default for MultiClusterSection {
    fn default() -> Self {
        Self {
            stanza: default_stanza(),
        }
    }
}

fn default_stanza() -> String {
    "multicluster".to_string()
}
