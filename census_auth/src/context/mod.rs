mod builder;
mod urls;

pub use builder::{RequestContext, RequestInfo, build_context};
pub use urls::{UrlTemplate, scoped_path};
