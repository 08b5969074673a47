use thiserror::Error;

pub type Result<T> = std::result::Result<T, BeamsError>;

#[derive(Debug, Error)]
pub enum BeamsError {
    #[error("WebGL2 not supported")]
    WebGlUnavailable,

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program failed to link: {0}")]
    ProgramLink(String),

    #[error("no shader chunk named <{0}>")]
    UnknownChunk(String),

    #[error("uniform `{0}` is declared in the shader but has no value")]
    MissingUniform(String),

    #[error("invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<BeamsError> for wasm_bindgen::JsValue {
    fn from(err: BeamsError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
