//! Rendering matched entries as display text.
//!
//! Output is lightweight markdown: bold headers, bullet lists and an italic footer. List fields
//! are rendered in declaration order.

use crate::constants::{CLINICAL_FOOTER, RESEARCH_FOOTER, SYMPTOM_DISCLAIMER};
use knowledge::{QaAudience, QaItem, SymptomEntry};

/// Renders a symptom entry followed by the fixed disclaimer.
pub fn format_symptom(entry: &SymptomEntry) -> String {
    let home_care = bullets(entry.home_care.iter().map(String::as_str), "•");

    let medication = entry
        .medication
        .iter()
        .map(|m| match &m.note {
            Some(note) => format!("• {} — {}\n  ({})", m.name, m.dosage, note),
            None => format!("• {} — {}", m.name, m.dosage),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let warnings = bullets(entry.see_doctor_if.iter().map(String::as_str), "🔴");

    format!(
        "🩺 **{name}**\n\n\
         **Possible Cause:** {cause}\n\n\
         **🏠 Home Care:**\n{home_care}\n\n\
         **💊 OTC Medication:**\n{medication}\n\n\
         **⚠️ See a Doctor If:**\n{warnings}{SYMPTOM_DISCLAIMER}",
        name = entry.name,
        cause = entry.cause,
    )
}

/// Renders a Q&A item with the footer for its audience. Blank answer lines are skipped.
pub fn format_qa(item: &QaItem, audience: QaAudience) -> String {
    let (icon, footer) = match audience {
        QaAudience::Clinical => ("🏥", CLINICAL_FOOTER),
        QaAudience::Research => ("🔬", RESEARCH_FOOTER),
    };

    let answer = bullets(
        item.answer
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty()),
        "•",
    );

    format!(
        "{icon} **{category}**\n\n**{question}**\n\n{answer}{footer}",
        category = item.category,
        question = item.question,
    )
}

fn bullets<'a>(lines: impl Iterator<Item = &'a str>, marker: &str) -> String {
    lines
        .map(|line| format!("{marker} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge::{Keyword, Medication, NonEmptyText};

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("text")
    }

    fn symptom() -> SymptomEntry {
        SymptomEntry {
            name: text("Mild Diarrhea"),
            keywords: vec![Keyword::new("diarrhea").expect("keyword")],
            cause: text("Food contamination."),
            home_care: vec!["Drink ORS".into(), "Eat light food".into()],
            medication: vec![
                Medication {
                    name: text("ORS"),
                    dosage: text("After every loose stool"),
                    note: Some("1L water + 6 tsp sugar + 1/2 tsp salt".into()),
                },
                Medication {
                    name: text("Zinc tablets"),
                    dosage: text("As advised by pharmacist"),
                    note: None,
                },
            ],
            see_doctor_if: vec!["Blood in stool".into(), "Lasts over 24 hours".into()],
        }
    }

    #[test]
    fn symptom_layout() {
        let out = format_symptom(&symptom());

        assert!(out.starts_with("🩺 **Mild Diarrhea**\n\n**Possible Cause:** Food contamination."));
        assert!(out.contains("**🏠 Home Care:**\n• Drink ORS\n• Eat light food\n\n"));
        assert!(out.contains(
            "• ORS — After every loose stool\n  (1L water + 6 tsp sugar + 1/2 tsp salt)\n• Zinc tablets — As advised by pharmacist\n\n"
        ));
        assert!(out.contains("**⚠️ See a Doctor If:**\n🔴 Blood in stool\n🔴 Lasts over 24 hours"));
        assert!(out.ends_with(SYMPTOM_DISCLAIMER));
    }

    #[test]
    fn symptom_lists_keep_declaration_order() {
        let mut entry = symptom();
        entry.home_care = vec!["zeta".into(), "alpha".into(), "mu".into()];
        let out = format_symptom(&entry);

        let z = out.find("• zeta").expect("zeta");
        let a = out.find("• alpha").expect("alpha");
        let m = out.find("• mu").expect("mu");
        assert!(z < a && a < m);
    }

    #[test]
    fn qa_skips_blank_lines_and_adds_audience_footer() {
        let item = QaItem {
            category: text("Medication Safety"),
            keywords: vec![Keyword::new("paracetamol dose").expect("keyword")],
            question: text("Maximum safe daily dose of paracetamol in adults?"),
            answer: vec!["3–4 g/day maximum".into(), "   ".into(), "Lower in liver disease".into()],
        };

        let clinical = format_qa(&item, QaAudience::Clinical);
        assert_eq!(
            clinical,
            format!(
                "🏥 **Medication Safety**\n\n**Maximum safe daily dose of paracetamol in adults?**\n\n• 3–4 g/day maximum\n• Lower in liver disease{CLINICAL_FOOTER}"
            )
        );

        let research = format_qa(&item, QaAudience::Research);
        assert!(research.starts_with("🔬 **Medication Safety**"));
        assert!(research.ends_with(RESEARCH_FOOTER));
        assert!(research.contains("validate against current literature"));
    }
}
