use std::path::Path;
use color_eyre::eyre::WrapErr;

/// Read one address per line, skipping blank lines
pub fn read_addresses(path: impl AsRef<Path>) -> color_eyre::Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read addresses from [{}]", path.display()))?;
    Ok(parse_addresses(&content))
}

fn parse_addresses(content: &str) -> Vec<String> {
    content.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
