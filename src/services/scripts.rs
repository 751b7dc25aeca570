// Everyday conversation scripts for the listening test, each under 15
// seconds when spoken. The ids match the question ids the frontend sends.
const CONVERSATION_SCRIPTS: &[(i64, &str)] = &[
    (
        1,
        "Hi! My name is Sarah. I work as a teacher at a local school. I really enjoy my job because I love helping students learn new things every day.",
    ),
    (
        2,
        "Good morning! I usually wake up at seven o'clock. First, I have breakfast with my family. Then I take a short walk before going to work. It's a nice routine.",
    ),
    (
        3,
        "I think learning English is very important today. It helps you communicate with people from different countries. You can also read books and watch movies in English.",
    ),
    (
        4,
        "Last weekend, I visited my grandmother. She lives in a small village near the mountains. We had lunch together and talked about old family stories. It was a wonderful visit.",
    ),
];

pub fn script_for(question_id: i64) -> Option<&'static str> {
    CONVERSATION_SCRIPTS
        .iter()
        .find(|(id, _)| *id == question_id)
        .map(|(_, script)| *script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert!(script_for(1).unwrap().starts_with("Hi! My name is Sarah."));
        for id in 1..=4 {
            assert!(script_for(id).is_some());
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert!(script_for(0).is_none());
        assert!(script_for(5).is_none());
        assert!(script_for(99).is_none());
    }
}
