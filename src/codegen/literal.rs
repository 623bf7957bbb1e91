//! Python literal formatting for emitted source.

use std::fmt::Write as _;

use crate::foundation::core::Rgba8;

/// Quote a file path, preferring a raw literal so Windows separators survive verbatim.
///
/// Raw literals cannot hold `"`, line breaks, or an odd run of trailing backslashes; those paths
/// fall back to an escaped ordinary literal.
pub fn path_literal(path: &str) -> String {
    let trailing_backslashes = path.chars().rev().take_while(|&c| c == '\\').count();
    let raw_ok = !path.contains(['"', '\n', '\r']) && trailing_backslashes % 2 == 0;
    if raw_ok {
        format!("r\"{path}\"")
    } else {
        string_literal(path)
    }
}

/// Double-quoted, escaped string literal. Non-ASCII text is kept as-is.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Float literal that always keeps a fractional part (`45.0`, `0.5`, `-30.0`).
pub fn float_literal(v: f64) -> String {
    if v.is_nan() {
        return "float(\"nan\")".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 {
            "float(\"inf\")".to_string()
        } else {
            "float(\"-inf\")".to_string()
        };
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        // Shortest round-trip form; never uses an exponent, so always valid Python.
        format!("{v}")
    }
}

/// `(r, g, b, a)` tuple.
pub fn color_tuple(c: Rgba8) -> String {
    format!("({}, {}, {}, {})", c.r, c.g, c.b, c.a)
}

/// Text safe to place after `#` on a single line.
pub fn comment_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Text safe to place on one line inside a `"""` docstring.
pub fn docstring_text(s: &str) -> String {
    comment_text(s)
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docstrings_cannot_be_closed_early() {
        assert_eq!(docstring_text(r#"a """ b"#), r#"a \"\"\" b"#);
        assert_eq!(docstring_text(r"C:\new"), r"C:\\new");
    }

    #[test]
    fn windows_paths_stay_raw() {
        assert_eq!(
            path_literal(r"assets\img\logo.png"),
            r#"r"assets\img\logo.png""#
        );
        assert_eq!(path_literal("a/b.png"), r#"r"a/b.png""#);
    }

    #[test]
    fn unrepresentable_raw_paths_fall_back() {
        assert_eq!(path_literal(r"dir\"), r#""dir\\""#);
        assert_eq!(path_literal(r"dir\\"), r#"r"dir\\""#);
        assert_eq!(path_literal(r#"a"b.png"#), r#""a\"b.png""#);
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(string_literal("Hello"), "\"Hello\"");
        assert_eq!(string_literal("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(string_literal("a\nb\\c"), r#""a\nb\\c""#);
        assert_eq!(string_literal("\u{1}"), r#""\x01""#);
        assert_eq!(string_literal("示例"), "\"示例\"");
    }

    #[test]
    fn floats_keep_a_fraction() {
        assert_eq!(float_literal(0.5), "0.5");
        assert_eq!(float_literal(45.0), "45.0");
        assert_eq!(float_literal(-30.0), "-30.0");
        assert_eq!(float_literal(12.25), "12.25");
        assert_eq!(float_literal(0.1), "0.1");
    }

    #[test]
    fn colors_and_comments() {
        assert_eq!(color_tuple(Rgba8::new(0, 10, 200, 255)), "(0, 10, 200, 255)");
        assert_eq!(comment_text("two\nlines"), "two lines");
    }
}
