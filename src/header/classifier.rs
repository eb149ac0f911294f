// Mon Oct 19 2026 - Alex

use crate::header::scanner::Declaration;
use crate::vtable::slot::VirtualFunctionSlot;
use once_cell::sync::Lazy;
use regex::Regex;

static VIRTUAL_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvirtual\b").unwrap());
static OVERRIDE_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\boverride\b").unwrap());
static DESTRUCTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvirtual\s+~\s*(\w+)\s*\(").unwrap());

/// Tokens that can sit between `virtual` and the parenthesis without being the name
const NON_NAME_TOKENS: &[&str] = &[
    "virtual", "const", "volatile", "static", "inline", "unsigned", "signed", "struct", "class",
    "enum", "typename", "FORCEINLINE",
];

pub fn has_virtual_keyword(text: &str) -> bool {
    VIRTUAL_KEYWORD.is_match(text)
}

pub fn has_override_qualifier(text: &str) -> bool {
    OVERRIDE_KEYWORD.is_match(text)
}

/// Outcome of classifying one completed declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NotVirtual,
    /// Reuses an inherited slot
    Override,
    NewSlot(VirtualFunctionSlot),
}

impl Classification {
    pub fn into_slot(self) -> Option<VirtualFunctionSlot> {
        match self {
            Classification::NewSlot(slot) => Some(slot),
            _ => None,
        }
    }
}

pub struct DeclarationClassifier;

impl DeclarationClassifier {
    pub fn classify(declaration: &Declaration) -> Classification {
        let text = declaration.text.as_str();

        if !has_virtual_keyword(text) {
            return Classification::NotVirtual;
        }
        if has_override_qualifier(text) {
            log::trace!("line {}: override, no new slot", declaration.line);
            return Classification::Override;
        }

        let slot = match extract_function_name(text) {
            Some((name, true)) => VirtualFunctionSlot::destructor(&name, declaration.line),
            Some((name, false)) => VirtualFunctionSlot::function(&name, declaration.line),
            None => {
                log::debug!("line {}: could not extract a name from `{}`", declaration.line, text);
                VirtualFunctionSlot::unknown(declaration.line)
            }
        };

        log::trace!("line {}: new slot {}", declaration.line, slot.name);
        Classification::NewSlot(slot)
    }

    pub fn classify_slot(declaration: &Declaration) -> Option<VirtualFunctionSlot> {
        Self::classify(declaration).into_slot()
    }
}

/// Returns the declared function name and whether it is a destructor
pub fn extract_function_name(text: &str) -> Option<(String, bool)> {
    if let Some(caps) = DESTRUCTOR.captures(text) {
        return Some((format!("~{}", &caps[1]), true));
    }

    let after_virtual = &text[VIRTUAL_KEYWORD.find(text)?.end()..];
    let paren = after_virtual.find('(')?;
    let head = after_virtual[..paren].trim_end();

    if let Some(name) = operator_name(head, &after_virtual[paren..]) {
        return Some((name, false));
    }

    let token = head.split_whitespace().last()?;
    let token = token.rsplit(|c: char| c == '*' || c == '&').next().unwrap_or(token);
    let token = token.rsplit("::").next().unwrap_or(token);

    if let Some(class_name) = token.strip_prefix('~') {
        return is_identifier(class_name).then(|| (token.to_string(), true));
    }

    if !is_identifier(token) || NON_NAME_TOKENS.contains(&token) {
        return None;
    }

    Some((token.to_string(), false))
}

fn operator_name(head: &str, from_paren: &str) -> Option<String> {
    let start = head
        .match_indices("operator")
        .map(|(i, _)| i)
        .find(|&i| i == 0 || !is_identifier_char(head[..i].chars().last().unwrap_or(' ')))?;
    let symbol: String = head[start + "operator".len()..].split_whitespace().collect();

    if symbol.chars().next().map(is_identifier_char).unwrap_or(false) {
        // `operatorFoo` is an ordinary identifier; `operator bool` a conversion
        if start + "operator".len() < head.len()
            && !head[start + "operator".len()..].starts_with(char::is_whitespace)
        {
            return None;
        }
        return Some(format!("operator {}", symbol));
    }
    if symbol.is_empty() && from_paren.starts_with("()") {
        return Some("operator()".to_string());
    }
    Some(format!("operator{}", symbol))
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(is_identifier_char),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(text: &str) -> Declaration {
        Declaration {
            text: text.to_string(),
            line: 1,
        }
    }

    fn name_of(text: &str) -> (String, bool) {
        extract_function_name(text).unwrap()
    }

    #[test]
    fn test_plain_function() {
        assert_eq!(name_of("virtual void ProcessEvent(UFunction* Function, void* Parms);"), ("ProcessEvent".to_string(), false));
        assert_eq!(name_of("virtual bool IsNameStableForNetworking() const;"), ("IsNameStableForNetworking".to_string(), false));
        assert_eq!(name_of("virtual void Tick (float DeltaSeconds);"), ("Tick".to_string(), false));
    }

    #[test]
    fn test_pointer_and_reference_returns() {
        assert_eq!(name_of("virtual const TCHAR* GetName() const;"), ("GetName".to_string(), false));
        assert_eq!(name_of("virtual FString *GetDetailedInfo();"), ("GetDetailedInfo".to_string(), false));
        assert_eq!(name_of("virtual FVector& GetLocation();"), ("GetLocation".to_string(), false));
        assert_eq!(name_of("virtual TMap<FName, int32>& GetMapping();"), ("GetMapping".to_string(), false));
        assert_eq!(name_of("virtual ENGINE_API UWorld* GetWorld() const;"), ("GetWorld".to_string(), false));
    }

    #[test]
    fn test_destructors() {
        assert_eq!(name_of("virtual ~UObject();"), ("~UObject".to_string(), true));
        assert_eq!(name_of("virtual ~ UObjectBase ( );"), ("~UObjectBase".to_string(), true));
        assert_eq!(name_of("virtual COREUOBJECT_API ~UObject();"), ("~UObject".to_string(), true));
    }

    #[test]
    fn test_operators() {
        assert_eq!(name_of("virtual bool operator==(const FFoo& Other) const;"), ("operator==".to_string(), false));
        assert_eq!(name_of("virtual void operator()(int32 Value);"), ("operator()".to_string(), false));
        assert_eq!(name_of("virtual operator bool() const;"), ("operator bool".to_string(), false));
        assert_eq!(name_of("virtual void operatorHelper();"), ("operatorHelper".to_string(), false));
    }

    #[test]
    fn test_unresolvable_names() {
        assert_eq!(extract_function_name("virtual int32 Count;"), None);
        assert_eq!(extract_function_name("virtual (int32);"), None);
        assert_eq!(extract_function_name("virtual const();"), None);
    }

    #[test]
    fn test_override_produces_no_slot() {
        let result = DeclarationClassifier::classify(&decl("virtual void BeginPlay() override;"));
        assert_eq!(result, Classification::Override);

        let result = DeclarationClassifier::classify(&decl("virtual ~AActor() override;"));
        assert_eq!(result, Classification::Override);
    }

    #[test]
    fn test_missing_virtual_keyword() {
        let result = DeclarationClassifier::classify(&decl("void NotVirtual();"));
        assert_eq!(result, Classification::NotVirtual);
        assert!(DeclarationClassifier::classify_slot(&decl("int32 virtualCount;")).is_none());
    }

    #[test]
    fn test_unknown_name_is_sentinel() {
        let slot = DeclarationClassifier::classify_slot(&decl("virtual int32 Count;")).unwrap();
        assert!(slot.is_unknown());
        assert!(!slot.is_destructor);
    }

    #[test]
    fn test_destructor_slot() {
        let slot = DeclarationClassifier::classify_slot(&Declaration {
            text: "virtual ~Mid();".to_string(),
            line: 7,
        })
        .unwrap();
        assert_eq!(slot, VirtualFunctionSlot::destructor("~Mid", 7));
    }

    #[test]
    fn test_inline_body_and_pure_virtual() {
        let slot = DeclarationClassifier::classify_slot(&decl("virtual int32 GetCount() const { return Count; }")).unwrap();
        assert_eq!(slot.name, "GetCount");

        let slot = DeclarationClassifier::classify_slot(&decl("virtual void Serialize(FArchive& Ar) = 0;")).unwrap();
        assert_eq!(slot.name, "Serialize");
    }
}
