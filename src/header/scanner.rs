// Mon Oct 19 2026 - Alex

use crate::header::classifier::has_virtual_keyword;
use crate::header::error::HeaderError;
use crate::header::preprocessor::{EditorGuardMatcher, GuardStack};
use once_cell::sync::Lazy;
use regex::Regex;

static PUBLIC_BASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^:]):\s*public\s+((?:\w+::)*\w+)").unwrap());

/// A completed virtual declaration, possibly joined from several lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub text: String,
    /// 1-based line the declaration started on
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub class_found: bool,
    /// Base named by a `: public Parent` clause, if the header has one
    pub declared_parent: Option<String>,
    pub declarations: Vec<Declaration>,
}

/// Where the scanner is relative to the target class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassScope {
    Outside,
    /// Declaration matched, opening brace not seen yet
    Header,
    Body,
}

#[derive(Debug, Clone)]
struct PendingDeclaration {
    text: String,
    start_line: usize,
}

impl PendingDeclaration {
    fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    /// A terminator ends a declaration, and so does the start of an inline body
    fn is_complete(&self) -> bool {
        self.text.contains(';') || self.text.contains('{')
    }
}

/// Everything the scanner tracks between lines
#[derive(Debug, Clone)]
pub struct ScanState {
    guards: GuardStack,
    scope: ClassScope,
    brace_depth: i64,
    pending: Option<PendingDeclaration>,
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            guards: GuardStack::new(),
            scope: ClassScope::Outside,
            brace_depth: 0,
            pending: None,
        }
    }

    pub fn scope(&self) -> ClassScope {
        self.scope
    }

    pub fn is_guarded(&self) -> bool {
        self.guards.is_guarded()
    }

    pub fn brace_depth(&self) -> i64 {
        self.brace_depth
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn enter_class(&mut self, raw: &str) {
        self.brace_depth = brace_delta(raw);
        if self.brace_depth > 0 {
            self.scope = ClassScope::Body;
        } else if raw.contains('{') {
            self.leave_class();
        } else {
            self.brace_depth = 0;
            self.scope = ClassScope::Header;
        }
    }

    /// Back to searching; a later match of the class pattern opens a new scope
    fn leave_class(&mut self) {
        self.scope = ClassScope::Outside;
        self.brace_depth = 0;
        self.pending = None;
    }

    /// Returns false once the line closed the scope
    fn track_braces(&mut self, raw: &str) -> bool {
        let opens = raw.matches('{').count();
        self.brace_depth += brace_delta(raw);

        let closed = match self.scope {
            ClassScope::Header if opens > 0 => {
                self.scope = ClassScope::Body;
                self.brace_depth <= 0
            }
            ClassScope::Body => self.brace_depth <= 0,
            _ => false,
        };

        if closed {
            self.leave_class();
            return false;
        }
        true
    }

    fn accumulate(&mut self, line_no: usize, line: &str) -> Option<Declaration> {
        if self.pending.is_none() && !has_virtual_keyword(line) {
            return None;
        }

        let pending = self.pending.get_or_insert_with(|| PendingDeclaration {
            text: String::new(),
            start_line: line_no,
        });
        pending.push_line(line);

        if !pending.is_complete() {
            return None;
        }
        self.pending.take().map(|p| Declaration {
            text: p.text,
            line: p.start_line,
        })
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

fn brace_delta(raw: &str) -> i64 {
    raw.matches('{').count() as i64 - raw.matches('}').count() as i64
}

/// Extracts the virtual declarations of one class from header text.
///
/// Braces are counted per character, so braces inside string literals or
/// comments are counted too.
pub struct DeclarationScanner<'a> {
    class_name: String,
    class_pattern: Regex,
    guards: &'a EditorGuardMatcher,
}

impl<'a> DeclarationScanner<'a> {
    pub fn new(class_name: &str, guards: &'a EditorGuardMatcher) -> Result<Self, HeaderError> {
        let class_name = class_name.trim();
        if class_name.is_empty() || !class_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(HeaderError::InvalidClassName(class_name.to_string()));
        }

        let class_pattern = Regex::new(&format!(r"\bclass\b[^;]*?\b{}\b", regex::escape(class_name)))?;

        Ok(Self {
            class_name: class_name.to_string(),
            class_pattern,
            guards,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn scan(&self, text: &str) -> ScanResult {
        let mut state = ScanState::new();
        let mut result = ScanResult::default();

        for (index, raw) in text.lines().enumerate() {
            self.feed_line(&mut state, &mut result, index + 1, raw);
        }

        if state.has_pending() {
            log::debug!("{}: unterminated virtual declaration at end of header", self.class_name);
        }

        result
    }

    /// Advance the state by one source line
    pub fn feed_line(&self, state: &mut ScanState, result: &mut ScanResult, line_no: usize, raw: &str) {
        let line = raw.trim();

        if line.starts_with('#') {
            state.guards.apply(self.guards.classify(line));
            return;
        }
        if state.is_guarded() {
            return;
        }

        match state.scope {
            ClassScope::Outside => {
                if self.opens_class(line) {
                    log::debug!("{}: class declaration at line {}", self.class_name, line_no);
                    result.class_found = true;
                    if let Some(parent) = declared_base(line) {
                        result.declared_parent = Some(parent);
                    }
                    state.enter_class(raw);
                }
            }
            ClassScope::Header | ClassScope::Body => {
                if state.scope == ClassScope::Header && result.declared_parent.is_none() {
                    result.declared_parent = declared_base(line);
                }
                if !state.track_braces(raw) {
                    return;
                }
                if state.scope == ClassScope::Body {
                    if let Some(declaration) = state.accumulate(line_no, line) {
                        result.declarations.push(declaration);
                    }
                }
            }
        }
    }

    fn opens_class(&self, line: &str) -> bool {
        if !self.class_pattern.is_match(line) {
            return false;
        }
        // `class UObject;` and `friend class UObject;` only name the class
        let code = line.split("//").next().unwrap_or(line).trim_end();
        !(code.ends_with(';') && !code.contains('{'))
    }

}

/// Unqualified name from a `: public Parent` clause
fn declared_base(line: &str) -> Option<String> {
    let caps = PUBLIC_BASE.captures(line)?;
    let qualified = caps.get(1)?.as_str();
    let name = qualified.rsplit("::").next().unwrap_or(qualified);
    Some(name.to_string())
}
