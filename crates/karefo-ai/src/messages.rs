//! Tamil explanations for words missing from the dictionary.
//!
//! Each template has exactly one [`WORD_PLACEHOLDER`]. The braces around the
//! placeholder and around the alternative categories are part of the message
//! text.

/// Substitution point for the word in every template.
pub const WORD_PLACEHOLDER: &str = "{word}";

const PLACE: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு இடத்தைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் \
எனின் இது ஒரு {ஊரின் | நாட்டின்} பெயரைக் குறிக்கலாம்.";

const MALE: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு ஆளைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் \
எனின் இது ஒரு {ஆணின்} பெயரைக் குறிக்கலாம்.";

const FEMALE: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு ஆளைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் \
எனின் இது ஒரு {பெண்ணின்} பெயரைக் குறிக்கலாம்.";

const PERSON: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு ஆளைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன்.";

// Same wording as PLACE.
const ORGANIZATION: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு இடத்தைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் \
எனின் இது ஒரு {ஊரின் | நாட்டின்} பெயரைக் குறிக்கலாம்.";

const CURRENCY: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு நாட்டின் பணத்தைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன்.";

const UNIT: &str = "{{word}} எனும் சொல் அகராதியில் இல்லை. இது ஒரு அலகைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் \
எனின் இது ஒரு {எண்ணின் | அளவையின் | தொகையின்} பெயரைக் குறிக்கலாம்.";

/// label → template.
const TEMPLATES: &[(&str, &str)] = &[
    ("PLACE", PLACE),
    ("MALE", MALE),
    ("FEMALE", FEMALE),
    ("PERSON", PERSON),
    ("ORGANIZATION", ORGANIZATION),
    ("CURRENCY", CURRENCY),
    ("UNIT", UNIT),
];

/// Template for a label, if it has one.
pub fn template_for(label: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, t)| *t)
}

/// Explanatory message for a word, or `None`.
///
/// Known words never get a message. Unknown words get one only when their
/// label has a template; sentinel and untemplated labels get `None`.
///
/// `word` is inserted verbatim with no escaping. Treat the result as plain
/// text: rendering it as markup would let the caller's input inject content.
pub fn format_message(word: &str, label: &str, is_known: bool) -> Option<String> {
    if is_known {
        return None;
    }
    template_for(label).map(|template| template.replacen(WORD_PLACEHOLDER, word, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templated_labels() -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(l, _)| *l)
    }
    use karefo_core::Label;

    #[test]
    fn place_message_renders_verbatim() {
        let msg = format_message("மும்பை", "PLACE", false).unwrap();
        assert_eq!(
            msg,
            "{மும்பை} எனும் சொல் அகராதியில் இல்லை. இது ஒரு இடத்தைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன் எனின் இது ஒரு {ஊரின் | நாட்டின்} பெயரைக் குறிக்கலாம்."
        );
    }

    #[test]
    fn currency_message_renders_verbatim() {
        let msg = format_message("ரூபாய்", "CURRENCY", false).unwrap();
        assert_eq!(
            msg,
            "{ரூபாய்} எனும் சொல் அகராதியில் இல்லை. இது ஒரு நாட்டின் பணத்தைக் குறிக்கும் பெயர்ச்சொல்லாக இருக்கலாம் என்று கருதுகிறேன்."
        );
    }

    #[test]
    fn unit_lists_three_options() {
        let msg = format_message("கிலோ", "UNIT", false).unwrap();
        assert!(msg.contains("{எண்ணின் | அளவையின் | தொகையின்}"));
    }

    #[test]
    fn organization_shares_place_wording() {
        assert_eq!(
            format_message("x", "ORGANIZATION", false),
            format_message("x", "PLACE", false)
        );
    }

    #[test]
    fn every_template_has_one_placeholder() {
        for label in templated_labels() {
            let template = template_for(label).unwrap();
            assert_eq!(
                template.matches(WORD_PLACEHOLDER).count(),
                1,
                "{label} template"
            );
        }
        assert_eq!(templated_labels().count(), 7);
    }

    #[test]
    fn every_template_embeds_the_word() {
        for label in templated_labels() {
            let msg = format_message("சோதனை", label, false).unwrap();
            assert!(msg.starts_with("{சோதனை} எனும் சொல் அகராதியில் இல்லை."), "{label}");
            assert!(!msg.contains(WORD_PLACEHOLDER), "{label}");
        }
    }

    #[test]
    fn known_word_gets_no_message() {
        for label in templated_labels() {
            assert!(format_message("சென்னை", label, true).is_none());
        }
    }

    #[test]
    fn sentinels_and_unknown_labels_get_no_message() {
        assert!(format_message("w", Label::MODEL_NOT_LOADED, false).is_none());
        assert!(format_message("w", Label::PREDICTION_ERROR, false).is_none());
        assert!(format_message("w", "DATE", false).is_none());
        assert!(format_message("w", "place", false).is_none());
    }

    #[test]
    fn word_is_not_escaped() {
        let msg = format_message("<b>{word}</b>", "PERSON", false).unwrap();
        assert!(msg.starts_with("{<b>{word}</b>} எனும்"));
    }

    #[test]
    fn empty_word_still_formats() {
        let msg = format_message("", "MALE", false).unwrap();
        assert!(msg.starts_with("{} எனும்"));
        assert!(msg.contains("{ஆணின்}"));
    }
}
