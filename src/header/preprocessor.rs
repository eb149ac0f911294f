// Mon Oct 19 2026 - Alex

use crate::header::error::HeaderError;
use regex::Regex;

/// Macros whose conditional blocks only exist in editor builds
pub const DEFAULT_EDITOR_MACROS: &[&str] = &[
    "WITH_EDITOR",
    "WITH_EDITORONLY_DATA",
    "WITH_EDITOR_ONLY_DATA",
];

/// Conditional directives the scanner cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `#if`, `#ifdef` or `#ifndef`, flagged when it opens an editor-only block
    If { editor_only: bool },
    Elif,
    Else,
    Endif,
    /// `#include`, `#define`, `#pragma` and friends
    Other,
}

/// Recognizes conditionals whose condition leads with an editor-only macro,
/// either `#if MACRO`, `#if defined(MACRO)` or `#ifdef MACRO`.
#[derive(Debug, Clone)]
pub struct EditorGuardMatcher {
    pattern: Option<Regex>,
    macros: Vec<String>,
}

impl EditorGuardMatcher {
    pub fn new<S: AsRef<str>>(macros: &[S]) -> Result<Self, HeaderError> {
        let macros: Vec<String> = macros
            .iter()
            .map(|m| m.as_ref().trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        let pattern = if macros.is_empty() {
            None
        } else {
            Some(Self::build_pattern(&macros)?)
        };

        Ok(Self { pattern, macros })
    }

    fn build_pattern(macros: &[String]) -> Result<Regex, regex::Error> {
        let alternatives = macros
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"^#\s*(?:if\s+(?:defined\s*\(\s*(?:{alt})\s*\)|(?:{alt})\b)|ifdef\s+(?:{alt})\b)",
            alt = alternatives
        ))
    }

    pub fn macros(&self) -> &[String] {
        &self.macros
    }

    pub fn is_editor_guard(&self, line: &str) -> bool {
        self.pattern
            .as_ref()
            .map(|p| p.is_match(line.trim()))
            .unwrap_or(false)
    }

    /// Classify a trimmed line that starts with `#`
    pub fn classify(&self, line: &str) -> Directive {
        let keyword: String = line
            .trim_start()
            .trim_start_matches('#')
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();

        if keyword.starts_with("if") {
            Directive::If {
                editor_only: self.is_editor_guard(line),
            }
        } else if keyword == "elif" {
            Directive::Elif
        } else if keyword == "else" {
            Directive::Else
        } else if keyword == "endif" {
            Directive::Endif
        } else {
            Directive::Other
        }
    }
}

impl Default for EditorGuardMatcher {
    fn default() -> Self {
        let macros: Vec<String> = DEFAULT_EDITOR_MACROS.iter().map(|m| m.to_string()).collect();
        Self {
            pattern: Self::build_pattern(&macros).ok(),
            macros,
        }
    }
}

/// One flag per open conditional level, true while that level is an
/// editor-only branch. Lines are skipped whenever any enclosing level is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardStack {
    levels: Vec<bool>,
    active_editor_depth: usize,
}

impl GuardStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::If { editor_only } => self.open(editor_only),
            Directive::Else => self.flip(),
            Directive::Endif => self.close(),
            // `#elif` keeps the current level as is
            Directive::Elif | Directive::Other => {}
        }
    }

    pub fn open(&mut self, editor_only: bool) {
        self.levels.push(editor_only);
        if editor_only {
            self.active_editor_depth += 1;
        }
    }

    /// The `#else` branch of an editor guard is the shipping path
    pub fn flip(&mut self) {
        if let Some(top) = self.levels.last_mut() {
            if *top && self.active_editor_depth > 0 {
                *top = false;
                self.active_editor_depth -= 1;
            }
        }
    }

    /// Unbalanced `#endif` lines are ignored
    pub fn close(&mut self) {
        if let Some(was_editor) = self.levels.pop() {
            if was_editor && self.active_editor_depth > 0 {
                self.active_editor_depth -= 1;
            }
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.active_editor_depth > 0
    }

    pub fn active_editor_depth(&self) -> usize {
        self.active_editor_depth
    }

    pub fn nesting_depth(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_guard_forms() {
        let matcher = EditorGuardMatcher::default();

        assert!(matcher.is_editor_guard("#if WITH_EDITOR"));
        assert!(matcher.is_editor_guard("#  if WITH_EDITORONLY_DATA"));
        assert!(matcher.is_editor_guard("#if defined(WITH_EDITOR)"));
        assert!(matcher.is_editor_guard("#ifdef WITH_EDITOR_ONLY_DATA"));
        assert!(matcher.is_editor_guard("#if WITH_EDITOR && !UE_BUILD_SHIPPING"));
        assert!(!matcher.is_editor_guard("#if WITH_EDITOR_EXTRAS"));
        assert!(!matcher.is_editor_guard("#if !WITH_EDITOR"));
        assert!(!matcher.is_editor_guard("#ifndef WITH_EDITOR"));
        assert!(!matcher.is_editor_guard("#if UE_BUILD_SHIPPING"));
    }

    #[test]
    fn test_macro_must_lead_the_condition() {
        let matcher = EditorGuardMatcher::default();

        assert!(!matcher.is_editor_guard("#if (WITH_EDITOR)"));
        assert!(!matcher.is_editor_guard("#if !UE_BUILD_SHIPPING && WITH_EDITOR"));
        assert!(!matcher.is_editor_guard("#if PLATFORM_DESKTOP || WITH_EDITORONLY_DATA"));
        assert_eq!(
            matcher.classify("#if (WITH_EDITOR)"),
            Directive::If { editor_only: false }
        );

        let mut stack = GuardStack::new();
        stack.apply(matcher.classify("#if !UE_BUILD_SHIPPING && WITH_EDITOR"));
        assert!(!stack.is_guarded());
    }

    #[test]
    fn test_custom_macros() {
        let matcher = EditorGuardMatcher::new(&["WITH_DEV_TOOLS"]).unwrap();

        assert!(matcher.is_editor_guard("#if WITH_DEV_TOOLS"));
        assert!(!matcher.is_editor_guard("#if WITH_EDITOR"));

        let none = EditorGuardMatcher::new::<&str>(&[]).unwrap();
        assert!(!none.is_editor_guard("#if WITH_EDITOR"));
    }

    #[test]
    fn test_directive_classification() {
        let matcher = EditorGuardMatcher::default();

        assert_eq!(matcher.classify("#if WITH_EDITOR"), Directive::If { editor_only: true });
        assert_eq!(matcher.classify("#ifdef FOO"), Directive::If { editor_only: false });
        assert_eq!(matcher.classify("#ifndef FOO"), Directive::If { editor_only: false });
        assert_eq!(matcher.classify("#elif BAR"), Directive::Elif);
        assert_eq!(matcher.classify("# else"), Directive::Else);
        assert_eq!(matcher.classify("#endif // WITH_EDITOR"), Directive::Endif);
        assert_eq!(matcher.classify("#include \"CoreMinimal.h\""), Directive::Other);
    }

    #[test]
    fn test_guard_stack_nesting() {
        let mut stack = GuardStack::new();

        stack.open(false);
        assert!(!stack.is_guarded());

        stack.open(true);
        stack.open(false);
        assert!(stack.is_guarded());
        assert_eq!(stack.active_editor_depth(), 1);
        assert_eq!(stack.nesting_depth(), 3);

        stack.close();
        assert!(stack.is_guarded());
        stack.close();
        assert!(!stack.is_guarded());
        stack.close();
        assert_eq!(stack.nesting_depth(), 0);
    }

    #[test]
    fn test_else_of_editor_guard_is_shipping_path() {
        let mut stack = GuardStack::new();

        stack.apply(Directive::If { editor_only: true });
        assert!(stack.is_guarded());
        stack.apply(Directive::Else);
        assert!(!stack.is_guarded());
        stack.apply(Directive::Endif);
        assert_eq!(stack, GuardStack::new());
    }

    #[test]
    fn test_else_of_plain_conditional_inside_editor_block() {
        let mut stack = GuardStack::new();

        stack.apply(Directive::If { editor_only: true });
        stack.apply(Directive::If { editor_only: false });
        stack.apply(Directive::Else);
        assert!(stack.is_guarded());
        stack.apply(Directive::Endif);
        stack.apply(Directive::Endif);
        assert!(!stack.is_guarded());
    }

    #[test]
    fn test_unbalanced_endif_is_ignored() {
        let mut stack = GuardStack::new();
        stack.apply(Directive::Endif);
        stack.apply(Directive::Else);
        assert_eq!(stack.nesting_depth(), 0);
        assert!(!stack.is_guarded());
    }
}
