//! Iframe HTML for embedding a map.

use crate::config::EmbedConfig;
use std::fmt;

/// An HTML fragment that embeds a map in an iframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedHtml(String);

impl EmbedHtml {
    /// Render the iframe for `embed_url`.
    pub fn render(embed_url: &str, config: &EmbedConfig) -> Self {
        Self(format!(
            concat!(
                "<iframe\n",
                "    width=\"{}\"\n",
                "    height=\"{}\"\n",
                "    style=\"{}\"\n",
                "    title=\"{}\"\n",
                "    src=\"{}\"\n",
                "    referrerpolicy=\"{}\"\n",
                "></iframe>"
            ),
            escape_attr(&config.width),
            escape_attr(&config.height),
            escape_attr(&config.style),
            escape_attr(&config.title),
            escape_attr(embed_url),
            escape_attr(&config.referrer_policy),
        ))
    }

    /// Borrow the HTML.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the HTML as an owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmbedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Leaves `&` alone so query strings stay byte-identical.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_src_is_verbatim() {
        let url = "https://felt.com/embed/map/m1?loc=59.9,10.7,12z&share=1";
        let html = EmbedHtml::render(url, &EmbedConfig::default());
        assert!(html.as_str().contains(&format!("src=\"{}\"", url)));
        assert!(html.as_str().starts_with("<iframe"));
        assert!(html.as_str().ends_with("></iframe>"));
    }

    #[test]
    fn test_default_attributes() {
        let html = EmbedHtml::render("https://felt.com/embed/map/x", &EmbedConfig::default());
        let s = html.to_string();
        assert!(s.contains("width=\"99%\""));
        assert!(s.contains("height=\"450px\""));
        assert!(s.contains("title=\"Felt Map\""));
        assert!(s.contains("referrerpolicy=\"strict-origin-when-cross-origin\""));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let config = EmbedConfig {
            title: "A \"quoted\" <map>".to_string(),
            ..Default::default()
        };
        let html = EmbedHtml::render("u", &config);
        assert!(html.as_str().contains("title=\"A &quot;quoted&quot; &lt;map&gt;\""));
    }
}
