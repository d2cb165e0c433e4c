/// Split a `KEY=VALUE` property argument. The value may contain `=`.
pub fn parse_property(raw: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid property '{raw}': expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("invalid property '{raw}': key must not be empty");
    }
    Ok((key.to_string(), value.to_string()))
}
