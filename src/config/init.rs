// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates skiff.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SiteName;

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, site: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let site = match site {
        Some(s) => SiteName::new(s).map_err(|e| Error::InvalidArgument(e.to_string()))?,
        None => default_site_name(dir).ok_or_else(|| {
            Error::InvalidArgument("cannot derive a site name, pass --site".to_string())
        })?,
    };

    std::fs::write(&config_path, generate_template_yaml(&site))?;

    Ok(())
}

/// Derive a site name from the directory name, falling back to "website".
fn default_site_name(dir: &Path) -> Option<SiteName> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().replace(['_', ' ', '.'], "-"))
        .and_then(|name| SiteName::new(name.trim_matches('-')).ok())
        .or_else(|| SiteName::new("website").ok())
}

fn generate_template_yaml(site: &SiteName) -> String {
    format!(
        r#"site: {site}
path: dist

# Custom domain(s). The first one is the main domain.
# domain:
#   - www.example.com
#   - example.com
# certificate: arn:aws:acm:us-east-1:123456789012:certificate/...
# redirect_to_main_domain: true

# security:
#   allow_iframe: false

# error_page: error.html

outputs:
  file: .skiff/outputs.json
"#
    )
}
