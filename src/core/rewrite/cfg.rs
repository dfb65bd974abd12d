//! Part config (`.cfg`) rewriting: `title = Mk1 Pod` becomes
//! `title = #MyMod_Mk1_Pod`.

use crate::core::{
    fields::{FieldClassifier, is_localizable_value},
    literal::Origin,
    registry::KeyRegistry,
};

use super::{FileRewrite, LineChange, LineLayout};

/// Rewrite one `field = value` line, or `None` when it stays as is.
pub fn rewrite_cfg_line(
    line: &str,
    fields: &FieldClassifier,
    registry: &mut KeyRegistry,
) -> Option<String> {
    if line.trim_start().starts_with("//") {
        return None;
    }
    let eq = line.find('=')?;
    let field = line[..eq].trim();
    let (value, comment) = split_comment(&line[eq + 1..]);
    let value = value.trim();

    if !fields.is_display_field(field) || !is_localizable_value(value) {
        return None;
    }

    let key = registry.lookup_or_create(value, Origin::Config);
    let mut out = format!("{} #{}", &line[..=eq], key);
    if let Some(comment) = comment {
        out.push(' ');
        out.push_str(comment);
    }
    Some(out)
}

/// Rewrite a whole config file.
pub fn rewrite_cfg(source: &str, fields: &FieldClassifier, registry: &mut KeyRegistry) -> FileRewrite {
    let layout = LineLayout::detect(source);
    let mut lines = Vec::new();
    let mut changes = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        match rewrite_cfg_line(line, fields, registry) {
            Some(rewritten) => {
                changes.push(LineChange {
                    line: idx + 1,
                    offset: value_offset(line),
                    before: line.to_string(),
                    after: rewritten.clone(),
                });
                lines.push(rewritten);
            }
            None => lines.push(line.to_string()),
        }
    }

    FileRewrite {
        content: layout.join(&lines),
        changes,
        using_inserted: false,
    }
}

/// Split `value // comment` into the value and the comment (with its `//`).
fn split_comment(rest: &str) -> (&str, Option<&str>) {
    match rest.find("//") {
        Some(i) => (&rest[..i], Some(rest[i..].trim_end())),
        None => (rest, None),
    }
}

fn value_offset(line: &str) -> usize {
    let Some(eq) = line.find('=') else {
        return 0;
    };
    let after = &line[eq + 1..];
    eq + 1 + (after.len() - after.trim_start().len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{
        patterns::PatternSet,
        registry::{KeyMode, KeySettings},
    };

    fn registry() -> KeyRegistry {
        KeyRegistry::new(KeySettings {
            prefix: "MyMod".to_string(),
            mode: KeyMode::Sanitized,
            max_tail_len: 25,
        })
    }

    fn fields() -> FieldClassifier {
        FieldClassifier::new(PatternSet::default(), &["Mun".to_string()])
    }

    #[test]
    fn test_title_line() {
        let mut reg = registry();
        assert_eq!(
            rewrite_cfg_line("\ttitle = Mk1 Command Pod", &fields(), &mut reg).as_deref(),
            Some("\ttitle = #MyMod_Mk1_Command_Pod")
        );
        assert_eq!(reg.entries()[0].literal.origin, Origin::Config);
    }

    #[test]
    fn test_trailing_comment_is_kept() {
        let mut reg = registry();
        assert_eq!(
            rewrite_cfg_line("description = A sturdy pod // stock", &fields(), &mut reg)
                .as_deref(),
            Some("description = #MyMod_A_sturdy_pod // stock")
        );
        assert_eq!(reg.entries()[0].literal.text, "A sturdy pod");
    }

    #[test]
    fn test_lines_left_alone() {
        let mut reg = registry();
        let fields = fields();
        for line in [
            "// title = Commented",
            "PART",
            "{",
            "mass = 0.8",
            "title = #autoLOC_500123",
            "title = 12",
            "title =",
            "name = mk1pod",
        ] {
            assert_eq!(rewrite_cfg_line(line, &fields, &mut reg), None, "{}", line);
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn test_science_result_field() {
        let mut reg = registry();
        assert_eq!(
            rewrite_cfg_line("    MunSrfLanded = Dust everywhere.", &fields(), &mut reg).as_deref(),
            Some("    MunSrfLanded = #MyMod_Dust_everywhere")
        );
    }

    #[test]
    fn test_whole_file() {
        let source = "PART\r\n{\r\n\tname = pod\r\n\ttitle = Pod\r\n\tmanufacturer = Kerlington\r\n}\r\n";
        let result = rewrite_cfg(source, &fields(), &mut registry());
        assert_eq!(
            result.content,
            "PART\r\n{\r\n\tname = pod\r\n\ttitle = #MyMod_Pod\r\n\tmanufacturer = #MyMod_Kerlington\r\n}\r\n"
        );
        assert_eq!(result.changes.len(), 2);
        assert_eq!(result.changes[0].line, 4);
        assert_eq!(result.changes[0].offset, 9);
    }

    #[test]
    fn test_shares_keys_with_code() {
        let mut reg = registry();
        let code_key = reg.lookup_or_create("Pod", Origin::Code);
        let result = rewrite_cfg("title = Pod\n", &fields(), &mut reg);
        assert_eq!(result.content, format!("title = #{}\n", code_key));
        assert_eq!(reg.len(), 1);
    }
}
