//! Requester parsing and prompt text.
//!
//! Everything here is pure: the same requester name and catalog always give
//! the same [`PromptSpec`], so it can be tested without a display.

use std::collections::HashMap;
use std::ffi::OsStr;

/// Shown when no requester name was passed.
pub const FALLBACK_REQUESTER: &str = "An application";
/// Window title.
pub const MSG_TITLE: &str = "AI Capability Request";
/// Instruction template; `{requester}` is replaced by the requester name.
pub const MSG_INSTRUCTION: &str = "{requester} wants to use AI capabilities. Approve?";
/// Explanatory body under the instruction.
pub const MSG_BODY: &str = "This request is sent by the local AI capability management service.";
/// Affirmative button.
pub const MSG_ALLOW: &str = "Allow";
/// Negative button.
pub const MSG_CANCEL: &str = "Cancel";

const REQUESTER_PLACEHOLDER: &str = "{requester}";

/// Looks up the display text for a message id.
pub trait Translator {
    fn translate(&self, msgid: &str) -> String;
}

/// The untranslated English source strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceCatalog;

impl Translator for SourceCatalog {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_owned()
    }
}

/// A loaded catalog; missing entries fall back to the message id.
impl Translator for HashMap<String, String> {
    fn translate(&self, msgid: &str) -> String {
        self.get(msgid).cloned().unwrap_or_else(|| msgid.to_owned())
    }
}

/// Everything the consent window displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    /// The requester name exactly as received (inert display text).
    pub requester: String,
    pub title: String,
    pub instruction: String,
    pub body: String,
    pub allow_label: String,
    pub deny_label: String,
}

/// First invocation argument if present and non-empty, else the fallback name.
///
/// `args` are the arguments after the program name. Never fails and never
/// returns an empty string.
pub fn parse_requester_name<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    parse_requester_name_with(&SourceCatalog, args)
}

/// [`parse_requester_name`] with a translated fallback.
pub fn parse_requester_name_with<T, I, S>(translator: &T, args: I) -> String
where
    T: Translator + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .next()
        .map(|first| first.as_ref().to_string_lossy().into_owned())
        .filter(|first| !first.is_empty())
        .unwrap_or_else(|| lookup(translator, FALLBACK_REQUESTER))
}

/// Build the prompt from the English source strings.
#[must_use]
pub fn build_prompt(requester: &str) -> PromptSpec {
    build_prompt_with(&SourceCatalog, requester)
}

/// Build the prompt through `translator`.
///
/// A translated instruction without the `{requester}` placeholder cannot name
/// the requester, so the English instruction is used instead.
#[must_use]
pub fn build_prompt_with<T: Translator + ?Sized>(translator: &T, requester: &str) -> PromptSpec {
    let template = lookup(translator, MSG_INSTRUCTION);
    let instruction = fill_requester(&template, requester).unwrap_or_else(|| {
        tracing::warn!(
            template = %template,
            "translated instruction has no requester placeholder; using source text"
        );
        format!("{requester} wants to use AI capabilities. Approve?")
    });

    PromptSpec {
        requester: requester.to_owned(),
        title: lookup(translator, MSG_TITLE),
        instruction,
        body: lookup(translator, MSG_BODY),
        allow_label: lookup(translator, MSG_ALLOW),
        deny_label: lookup(translator, MSG_CANCEL),
    }
}

/// Substitute the requester into the first placeholder. The requester text is
/// inserted as-is and never scanned for placeholders itself.
fn fill_requester(template: &str, requester: &str) -> Option<String> {
    let (before, after) = template.split_once(REQUESTER_PLACEHOLDER)?;
    let mut out = String::with_capacity(before.len() + requester.len() + after.len());
    out.push_str(before);
    out.push_str(requester);
    out.push_str(after);
    Some(out)
}

fn lookup<T: Translator + ?Sized>(translator: &T, msgid: &str) -> String {
    let text = translator.translate(msgid);
    if text.trim().is_empty() {
        msgid.to_owned()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_argument_is_the_requester() {
        assert_eq!(parse_requester_name(["PhotoEditor", "extra"]), "PhotoEditor");
    }

    #[test]
    fn missing_or_empty_argument_uses_fallback() {
        assert_eq!(parse_requester_name(Vec::<String>::new()), FALLBACK_REQUESTER);
        assert_eq!(parse_requester_name([""]), FALLBACK_REQUESTER);
    }

    #[test]
    fn whitespace_argument_is_kept_verbatim() {
        assert_eq!(parse_requester_name(["  "]), "  ");
    }

    #[test]
    fn fallback_is_translated() {
        let catalog: HashMap<String, String> =
            [(FALLBACK_REQUESTER.to_owned(), "Une application".to_owned())].into();
        assert_eq!(
            parse_requester_name_with(&catalog, Vec::<&str>::new()),
            "Une application"
        );
    }

    #[test]
    fn empty_translation_never_yields_empty_name() {
        let catalog: HashMap<String, String> =
            [(FALLBACK_REQUESTER.to_owned(), String::new())].into();
        assert_eq!(
            parse_requester_name_with(&catalog, Vec::<&str>::new()),
            FALLBACK_REQUESTER
        );
    }

    #[test]
    fn instruction_names_the_requester() {
        let prompt = build_prompt("PhotoEditor");
        assert_eq!(
            prompt.instruction,
            "PhotoEditor wants to use AI capabilities. Approve?"
        );
        assert_eq!(prompt.title, "AI Capability Request");
        assert_eq!(prompt.allow_label, "Allow");
        assert_eq!(prompt.deny_label, "Cancel");
        assert_eq!(prompt.requester, "PhotoEditor");
    }

    #[test]
    fn build_prompt_is_deterministic() {
        for name in ["PhotoEditor", "An application", "名前", "a\nb"] {
            assert_eq!(build_prompt(name), build_prompt(name));
            assert!(build_prompt(name).instruction.contains(name));
        }
    }

    #[test]
    fn format_directives_in_requester_stay_literal() {
        let hostile = "%s %n {requester} $(rm -rf ~) {}";
        let prompt = build_prompt(hostile);
        assert_eq!(
            prompt.instruction,
            format!("{hostile} wants to use AI capabilities. Approve?")
        );
    }

    #[test]
    fn translated_template_places_requester() {
        let catalog: HashMap<String, String> = [(
            MSG_INSTRUCTION.to_owned(),
            "¿Aprobar el uso de IA por {requester}?".to_owned(),
        )]
        .into();
        let prompt = build_prompt_with(&catalog, "PhotoEditor");
        assert_eq!(prompt.instruction, "¿Aprobar el uso de IA por PhotoEditor?");
        assert_eq!(prompt.body, MSG_BODY);
    }

    #[test]
    fn template_without_placeholder_falls_back_to_english() {
        let catalog: HashMap<String, String> =
            [(MSG_INSTRUCTION.to_owned(), "Approve AI use?".to_owned())].into();
        let prompt = build_prompt_with(&catalog, "PhotoEditor");
        assert_eq!(
            prompt.instruction,
            "PhotoEditor wants to use AI capabilities. Approve?"
        );
    }
}
