//! Sitemap rendering
//!
//! The XML layout mirrors what sitemap consumers expect:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com</loc>
//!   </url>
//! </urlset>
//! ```

use crate::output::{OutputFormat, OutputResult};
use std::io::Write;

/// Namespace of the sitemaps.org 0.9 schema
pub const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Writes `pages` as an XML sitemap
///
/// Page addresses are escaped, so `&` in a query string becomes `&amp;`.
pub fn write_sitemap<W: Write>(pages: &[String], writer: &mut W) -> OutputResult<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;

    if pages.is_empty() {
        writeln!(writer, r#"<urlset xmlns="{}"></urlset>"#, SITEMAP_XMLNS)?;
        writer.flush()?;
        return Ok(());
    }

    writeln!(writer, r#"<urlset xmlns="{}">"#, SITEMAP_XMLNS)?;
    for page in pages {
        writeln!(writer, "  <url>")?;
        writeln!(
            writer,
            "    <loc>{}</loc>",
            html_escape::encode_text(page)
        )?;
        writeln!(writer, "  </url>")?;
    }
    writeln!(writer, "</urlset>")?;

    writer.flush()?;
    Ok(())
}

/// Writes one page per line
pub fn write_text<W: Write>(pages: &[String], writer: &mut W) -> OutputResult<()> {
    for page in pages {
        writeln!(writer, "{}", page)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `pages` in the requested format
pub fn write_pages<W: Write>(
    pages: &[String],
    format: OutputFormat,
    writer: &mut W,
) -> OutputResult<()> {
    match format {
        OutputFormat::Xml => write_sitemap(pages, writer),
        OutputFormat::Txt => write_text(pages, writer),
    }
}
