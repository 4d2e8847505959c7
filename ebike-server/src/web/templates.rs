//! Askama templates for the web frontend.

use askama::Template;

/// Map page shell.
///
/// Carries no data: the page pulls everything live from `/api/map`, so
/// the shell only provides the mount points and loads the script.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;
