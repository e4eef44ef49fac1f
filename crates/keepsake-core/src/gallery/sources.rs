//! Image source negotiation: modern-format preference and the fallback
//! chain a surface walks when a source fails to load.
//!
//! The chain is a finite list ending in an inline placeholder, so a
//! loader that advances on every failure always terminates and never
//! retries a source it already gave up on.

use indoc::indoc;
use serde::{Deserialize, Serialize};

/// Which modern image formats the rendering environment can decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSupport {
    #[serde(default)]
    pub avif: bool,
    #[serde(default)]
    pub webp: bool,
}

/// Where a source in the fallback chain came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Same path with a modern-format extension substituted in.
    Preferred,
    /// The configured path, untouched.
    Original,
    /// Inline SVG data URI; cannot fail to load.
    Placeholder,
}

/// One entry in a photo's fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub src: String,
    pub kind: SourceKind,
}

/// The extension to prefer, best format first. `None` when the
/// environment decodes neither.
pub fn preferred_ext(support: FormatSupport) -> Option<&'static str> {
    if support.avif {
        Some("avif")
    } else if support.webp {
        Some("webp")
    } else {
        None
    }
}

/// Substitute the preferred extension into `src`, or `None` when there
/// is nothing to substitute. Only classic raster extensions are
/// rewritten; anything else (already-modern files, extensionless
/// paths, data URIs) is left alone.
pub fn preferred_src(src: &str, support: FormatSupport) -> Option<String> {
    let ext = preferred_ext(support)?;
    let dot = src.rfind('.')?;
    let current = &src[dot + 1..];
    if !matches!(
        current.to_ascii_lowercase().as_str(),
        "jpg" | "jpeg" | "png"
    ) {
        return None;
    }
    Some(format!("{}.{}", &src[..dot], ext))
}

/// The full fallback chain for one photo: preferred format (when it
/// differs from the original), then the original, then the placeholder.
pub fn fallback_chain(src: &str, support: FormatSupport, label: &str) -> Vec<ImageSource> {
    let mut chain = Vec::with_capacity(3);
    if let Some(preferred) = preferred_src(src, support) {
        chain.push(ImageSource {
            src: preferred,
            kind: SourceKind::Preferred,
        });
    }
    chain.push(ImageSource {
        src: src.to_string(),
        kind: SourceKind::Original,
    });
    chain.push(ImageSource {
        src: placeholder_data_uri(label),
        kind: SourceKind::Placeholder,
    });
    chain
}

/// Inline SVG placeholder shown when every real source failed.
pub fn placeholder_data_uri(label: &str) -> String {
    let svg = format!(
        indoc! {r##"
            <svg xmlns="http://www.w3.org/2000/svg" width="600" height="450" viewBox="0 0 600 450">
              <rect width="600" height="450" fill="#f3e8e2"/>
              <text x="300" y="215" text-anchor="middle" font-family="sans-serif" font-size="28" fill="#b08c80">{label}</text>
              <text x="300" y="255" text-anchor="middle" font-family="sans-serif" font-size="16" fill="#b08c80">image unavailable</text>
            </svg>
        "##},
        label = label
    );
    format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: FormatSupport = FormatSupport {
        avif: true,
        webp: true,
    };
    const WEBP_ONLY: FormatSupport = FormatSupport {
        avif: false,
        webp: true,
    };
    const NEITHER: FormatSupport = FormatSupport {
        avif: false,
        webp: false,
    };

    #[test]
    fn avif_wins_over_webp() {
        assert_eq!(preferred_ext(BOTH), Some("avif"));
        assert_eq!(preferred_ext(WEBP_ONLY), Some("webp"));
        assert_eq!(preferred_ext(NEITHER), None);
    }

    #[test]
    fn substitutes_classic_extensions_only() {
        assert_eq!(
            preferred_src("photos/us.jpg", BOTH),
            Some("photos/us.avif".to_string())
        );
        assert_eq!(
            preferred_src("photos/us.JPEG", WEBP_ONLY),
            Some("photos/us.webp".to_string())
        );
        assert_eq!(preferred_src("photos/us.gif", BOTH), None);
        assert_eq!(preferred_src("photos/us.avif", BOTH), None);
        assert_eq!(preferred_src("photos/noext", BOTH), None);
        assert_eq!(preferred_src("photos/us.png", NEITHER), None);
    }

    #[test]
    fn chain_ends_in_placeholder() {
        let chain = fallback_chain("photos/us.jpg", BOTH, "photo-03");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].kind, SourceKind::Preferred);
        assert_eq!(chain[0].src, "photos/us.avif");
        assert_eq!(chain[1].kind, SourceKind::Original);
        assert_eq!(chain[1].src, "photos/us.jpg");
        assert_eq!(chain[2].kind, SourceKind::Placeholder);
        assert!(chain[2].src.starts_with("data:image/svg+xml,"));
    }

    #[test]
    fn chain_without_preferred_starts_at_original() {
        let chain = fallback_chain("photos/us.jpg", NEITHER, "photo-01");
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].kind, SourceKind::Original);
        assert_eq!(chain[1].kind, SourceKind::Placeholder);
    }

    #[test]
    fn placeholder_embeds_the_label() {
        let uri = placeholder_data_uri("photo-07");
        assert!(uri.contains("photo-07"));
        // Raw markup characters must be percent-encoded.
        assert!(!uri.contains('<'));
    }
}
