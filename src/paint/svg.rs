/// Wraps painter elements into a standalone SVG document.
pub fn document(elements: &[String], preserve_aspect_ratio: bool, viewbox: &str) -> String {
    let preserve = if preserve_aspect_ratio { "xMidYMid meet" } else { "none" };

    let mut out = String::new();
    out.push_str("<svg\n");
    out.push_str("  baseProfile=\"tiny\"\n");
    out.push_str(&format!("  preserveAspectRatio=\"{}\"\n", preserve));
    out.push_str("  version=\"1.2\"\n");
    out.push_str(&format!("  viewBox=\"{}\"\n", viewbox));
    out.push_str("  height=\"100%\" width=\"100%\"\n");
    out.push_str("  xmlns=\"http://www.w3.org/2000/svg\"\n");
    out.push_str("  xmlns:ev=\"http://www.w3.org/2001/xml-events\"\n");
    out.push_str("  xmlns:xlink=\"http://www.w3.org/1999/xlink\"\n");
    out.push_str(">\n");
    for el in elements {
        out.push_str("  ");
        out.push_str(el);
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}
