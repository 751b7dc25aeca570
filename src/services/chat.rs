struct Course {
    name: &'static str,
    duration: &'static str,
    price: &'static str,
    focus: &'static str,
}

const COURSES: &[Course] = &[
    Course {
        name: "Student English",
        duration: "6 months",
        price: "₹15,000",
        focus: "Academic English, exam prep",
    },
    Course {
        name: "Professional English",
        duration: "4 months",
        price: "₹20,000",
        focus: "Business communication, presentations",
    },
    Course {
        name: "Competitive Exam Prep",
        duration: "3 months",
        price: "₹18,000",
        focus: "IELTS, TOEFL, PTE preparation",
    },
    Course {
        name: "Teacher Training",
        duration: "2 months",
        price: "₹25,000",
        focus: "Teaching methodologies, classroom management",
    },
];

/// The Laila persona prompt: course catalog, platform facts, and a strict
/// language directive the model must follow for the whole conversation.
pub fn system_prompt(language: &str, user_name: Option<&str>) -> String {
    let language_directive = if language == "hi" {
        "You MUST respond ONLY in Hindi (Devanagari script). Never use English in your responses."
    } else {
        "You MUST respond ONLY in English. Never use Hindi in your responses."
    };

    let greeting = user_name
        .map(|name| {
            format!("The user's name is {name}. Use their name occasionally to personalize the conversation.\n")
        })
        .unwrap_or_default();

    let course_list = COURSES
        .iter()
        .map(|c| format!("- {}: {}, {} - Focus: {}", c.name, c.duration, c.price, c.focus))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are Laila, a friendly and helpful English course advisor at Vibe & Code English Academy.

{language_directive}
{greeting}
Your personality:
- Warm, encouraging, and patient
- Enthusiastic about helping people learn English
- Professional but approachable

Available courses:
{course_list}

Platform details:
- Website has a demo test to assess English level
- Free trial classes available
- Located in India, serving students worldwide

Your role:
- Help users choose the right course based on their needs
- Answer questions about courses, pricing, and schedules
- Encourage users to take the demo test or book a free trial

Keep responses concise (2-3 sentences) unless more detail is needed."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hindi_directive() {
        let prompt = system_prompt("hi", None);
        assert!(prompt.contains("ONLY in Hindi"));
        assert!(!prompt.contains("ONLY in English"));
    }

    #[test]
    fn test_english_directive_is_default() {
        for language in ["en", "fr", ""] {
            let prompt = system_prompt(language, None);
            assert!(prompt.contains("ONLY in English"));
        }
    }

    #[test]
    fn test_user_name_included() {
        let prompt = system_prompt("en", Some("Priya"));
        assert!(prompt.contains("The user's name is Priya."));
        assert!(!system_prompt("en", None).contains("The user's name"));
    }

    #[test]
    fn test_course_catalog_embedded() {
        let prompt = system_prompt("en", None);
        for course in ["Student English", "Professional English", "Competitive Exam Prep", "Teacher Training"] {
            assert!(prompt.contains(course), "missing course: {course}");
        }
        assert!(prompt.contains("₹15,000"));
    }
}
