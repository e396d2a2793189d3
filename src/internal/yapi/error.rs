use thiserror::Error;

/// Error taxonomy for the YApi tools. Everything a tool invocation can fail
/// with is one of these; the dispatcher turns them into error-flagged text
/// results, so none of them crosses the MCP boundary as a raw error.
#[derive(Debug, Error)]
pub enum YapiError {
    /// Credentials were missing when the tool was invoked. Checked per call,
    /// not at startup - the host may configure them after launch.
    #[error("YApi environment is not configured; set YAPI_URL and YAPI_TOKEN in the MCP client configuration")]
    NotConfigured,

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The remote call never produced a usable YApi envelope.
    #[error("YApi request failed: {0}")]
    Request(String),

    /// YApi answered, but with a non-zero errcode.
    #[error("{0}")]
    Api(String),
}
