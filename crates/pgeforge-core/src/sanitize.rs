//! Source sanitization.
//!
//! Scans a submission line by line before anything touches the filesystem or
//! a compiler. One pass does two rewrites:
//!
//! - include/import directives whose path starts with `.`, `..` or `/` are
//!   recorded as violations (bare system-style includes pass through), and
//! - recognized library-selection macros are blanked in place and recorded
//!   as link inputs.
//!
//! Blanking never removes a line, so diagnostics emitted later by the real
//! compiler still reference the 1-based line numbers of the original
//! submission.

use regex::Regex;

use crate::library::Library;

/// Virtual filename used in locally produced diagnostics. The front end
/// feeds these through the same parser it uses for real compiler output, so
/// they must look like compiler diagnostics for this file.
pub const VIRTUAL_SOURCE_NAME: &str = "/pgetinker.cpp";

/// Result of sanitizing one submission.
#[derive(Debug, Clone)]
pub struct Sanitized {
    /// Source text with library macro lines blanked, line count unchanged.
    pub text: String,
    /// Libraries selected by macros, in order of appearance.
    pub libraries: Vec<Library>,
    /// Violations collected over the whole source, one per offending line.
    pub diagnostics: Vec<String>,
}

impl Sanitized {
    /// True when the submission must be rejected without invoking any tool.
    pub fn is_rejected(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Line-oriented source filter.
pub struct SourceSanitizer {
    include_pattern: Regex,
}

impl SourceSanitizer {
    pub fn new() -> Self {
        // `#include`/`#import`/`#include_next` with a relative or absolute
        // path argument, in either quote style.
        let include_pattern =
            Regex::new(r#"^\s*#\s*i(nclude|mport)(_next)?\s+["<]((\.{1,2}|/)[^">]*)[">]"#)
                .expect("include pattern is a valid regex");
        Self { include_pattern }
    }

    /// Scan `source`, collecting violations and library selections.
    ///
    /// Violations do not short-circuit the pass; every offending line is
    /// reported so the user sees them all at once.
    pub fn sanitize(&self, source: &str) -> Sanitized {
        let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
        let mut libraries = Vec::new();
        let mut diagnostics = Vec::new();

        for (index, line) in lines.iter_mut().enumerate() {
            if self.include_pattern.is_match(line) {
                diagnostics.push(format!(
                    "{}:{}:1: no absolute or relative includes please",
                    VIRTUAL_SOURCE_NAME,
                    index + 1
                ));
                continue;
            }

            if line.contains("#define") {
                if let Some(library) = Library::detect(line) {
                    line.clear();
                    libraries.push(library);
                }
            }
        }

        Sanitized {
            text: lines.join("\n"),
            libraries,
            diagnostics,
        }
    }
}

impl Default for SourceSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_include() {
        let sanitizer = SourceSanitizer::new();
        let result = sanitizer.sanitize("#include \"../secret.h\"\nint main(){}");

        assert!(result.is_rejected());
        assert_eq!(
            result.diagnostics,
            vec!["/pgetinker.cpp:1:1: no absolute or relative includes please"]
        );
    }

    #[test]
    fn test_rejects_absolute_include() {
        let sanitizer = SourceSanitizer::new();

        for line in [
            "#include \"/etc/passwd\"",
            "#include </etc/passwd>",
            "  #  include \"./local.h\"",
            "#import \"../other.h\"",
            "#include_next \"/usr/include/stdio.h\"",
        ] {
            let result = sanitizer.sanitize(line);
            assert!(result.is_rejected(), "should reject: {}", line);
        }
    }

    #[test]
    fn test_system_includes_pass_through() {
        let sanitizer = SourceSanitizer::new();
        let source = "#include <vector>\n#include \"olcPixelGameEngine.h\"\nint main(){}";
        let result = sanitizer.sanitize(source);

        assert!(!result.is_rejected());
        assert_eq!(result.text, source);
        assert!(result.libraries.is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let sanitizer = SourceSanitizer::new();
        let source = "#include \"../a.h\"\nint x;\n#include \"/b.h\"";
        let result = sanitizer.sanitize(source);

        assert_eq!(
            result.diagnostics,
            vec![
                "/pgetinker.cpp:1:1: no absolute or relative includes please",
                "/pgetinker.cpp:3:1: no absolute or relative includes please",
            ]
        );
    }

    #[test]
    fn test_blanks_library_macro_and_preserves_numbering() {
        let sanitizer = SourceSanitizer::new();
        let source = "#define OLC_PGE_APPLICATION\n#include \"olcPixelGameEngine.h\"\nint main(){}";
        let result = sanitizer.sanitize(source);

        assert!(!result.is_rejected());
        assert_eq!(result.libraries, vec![Library::PixelGameEngine]);

        let lines: Vec<&str> = result.text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "#include \"olcPixelGameEngine.h\"");
    }

    #[test]
    fn test_unknown_define_left_untouched() {
        let sanitizer = SourceSanitizer::new();
        let result = sanitizer.sanitize("#define MY_THING 1");

        assert!(!result.is_rejected());
        assert!(result.libraries.is_empty());
        assert_eq!(result.text, "#define MY_THING 1");
    }

    #[test]
    fn test_violation_line_numbers_unaffected_by_blanking() {
        let sanitizer = SourceSanitizer::new();
        let source = "#define OLC_PGE_APPLICATION\nint x;\n#include \"../evil.h\"";
        let result = sanitizer.sanitize(source);

        assert_eq!(
            result.diagnostics,
            vec!["/pgetinker.cpp:3:1: no absolute or relative includes please"]
        );
    }

    #[test]
    fn test_records_multiple_libraries_in_order() {
        let sanitizer = SourceSanitizer::new();
        let source = "#define OLC_SOUNDWAVE_ENGINE\n#define OLC_PGE_APPLICATION\nint main(){}";
        let result = sanitizer.sanitize(source);

        assert_eq!(
            result.libraries,
            vec![Library::SoundWaveEngine, Library::PixelGameEngine]
        );

        let lines: Vec<&str> = result.text.split('\n').collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "");
    }
}
