use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for data-{key}")]
    Invalid { key: &'static str, value: String },
    #[error("data-{key} {reason}")]
    OutOfRange {
        key: &'static str,
        reason: &'static str,
    },
}

/// Shader pipeline stage, used to tag compile failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NebulaError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("program failed to link: {0}")]
    ProgramLink(String),
    #[error("uniform `{0}` not found in program")]
    MissingUniform(&'static str),
    #[error("could not allocate {0}")]
    Allocation(&'static str),
    #[error("grid of {vertices} vertices exceeds 16-bit index range")]
    GeometryTooLarge { vertices: u64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("js error: {0}")]
    Js(String),
}

pub type Result<T, E = NebulaError> = std::result::Result<T, E>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for NebulaError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        NebulaError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
