//! Fixed instruction prompt for keyword normalization.
//!
//! The prompt is written in the language of the directory data. It describes
//! the searchable record fields and gives worked examples so the model answers
//! with a short comma-separated keyword list and nothing else.

use crate::config::AiConfig;

use super::CompletionRequest;

/// Worked examples shown to the model, as (query, expected keywords).
pub const PROMPT_EXAMPLES: &[(&str, &str)] = &[
    ("atrod man visus maģistrus", "Mg., maģistrs"),
    ("pasniedzēji ar doktora grādu", "Dr., PhD, Dr. sc. ing."),
    ("visi profesori", "profesors"),
    ("lektori matemātikā", "lektors, matemātika"),
    ("kurš māca programmēšanu?", "programmēšana"),
    ("pasniedzēji Datoru sistēmu institūtā", "Datoru sistēmu"),
    ("docenti ar PhD", "docents, PhD"),
    ("visi ar maģistra grādu", "Mg."),
    ("bachelor grāda pasniedzēji", "Bc."),
    ("pasniedzēji bez akadēmiskā grāda", ""),
    ("profesori fizikas nodaļā", "profesors, fizika"),
];

const PROMPT_HEADER: &str = "\
Tu esi LBTU pasniedzēju meklēšanas asistents.

Datu bāzē ir šādi lauki:
- name (vārds)
- degree (akadēmiskais grāds: Dr., Mg., Bc., PhD, Dr. sc. ing., Dr. math., Dr. paed.)
- position (amats: profesors, docents, lektors, pasniedzējs, pētnieks)
- department (nodaļa: Datoru sistēmu institūts, Matemātikas institūts utt.)
- courses (kursi: matemātika, programmēšana, fizika utt.)
- research (pētniecības joma)

Uzdevums: pārveido lietotāja vaicājumu meklēšanas atslēgvārdos, kas atbilst datu bāzes saturam.

Piemēri:
";

const PROMPT_RULES: &str = "
Noteikumi:
1. Izmanto vārdus, kas faktiski atrodas datu bāzē.
2. Pārveido jautājumu uz konkrētiem datu bāzes laukiem.
3. Atgriez TIKAI atslēgvārdus, atdalītus ar komatu.
4. Ne vairāk kā 5 atslēgvārdi.";

/// Render the system instruction.
///
/// The instruction does not depend on the query; the query travels as the
/// user turn.
pub fn system_prompt() -> String {
    let mut prompt = String::from(PROMPT_HEADER);
    for (query, keywords) in PROMPT_EXAMPLES {
        if keywords.is_empty() {
            prompt.push_str(&format!("• \"{}\" → \"\" (tukšs)\n", query));
        } else {
            prompt.push_str(&format!("• \"{}\" → \"{}\"\n", query, keywords));
        }
    }
    prompt.push_str(PROMPT_RULES);
    prompt
}

/// Build the completion request for a user query.
pub fn keyword_request(config: &AiConfig, user_query: &str) -> CompletionRequest {
    CompletionRequest {
        system_prompt: system_prompt(),
        user_query: user_query.to_string(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_fields_and_examples() {
        let prompt = system_prompt();
        for field in ["name", "degree", "position", "department", "courses"] {
            assert!(prompt.contains(field), "missing field {}", field);
        }
        assert!(prompt.contains("\"lektori matemātikā\" → \"lektors, matemātika\""));
        assert!(prompt.contains("(tukšs)"));
        assert!(PROMPT_EXAMPLES.len() >= 10);
    }

    #[test]
    fn test_prompt_is_query_independent() {
        let config = AiConfig::new("key");
        let a = keyword_request(&config, "visi profesori");
        let b = keyword_request(&config, "docenti");
        assert_eq!(a.system_prompt, b.system_prompt);
        assert_eq!(a.user_query, "visi profesori");
        assert_eq!(a.max_tokens, 100);
        assert!((a.temperature - 0.3).abs() < f32::EPSILON);
    }
}
