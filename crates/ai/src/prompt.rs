//! Prompt construction for speaker notes.

use notes_core::SlideRecord;

/// Text of the slides adjacent to the one being annotated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    /// (slide number, text) of the previous slide.
    pub previous: Option<(usize, &'a str)>,
    /// (slide number, text) of the next slide.
    pub next: Option<(usize, &'a str)>,
}

impl<'a> ContextWindow<'a> {
    /// Context for 1-based `slide_number` within `slides`.
    ///
    /// Only the immediate neighbours are considered; a neighbour with empty
    /// text contributes nothing.
    pub fn around(slide_number: usize, slides: &'a [SlideRecord]) -> Self {
        let neighbour = |number: usize| {
            slides
                .get(number.checked_sub(1)?)
                .map(|s| s.original_text.as_str())
                .filter(|text| !text.is_empty())
                .map(|text| (number, text))
        };

        let previous = if slide_number > 1 {
            neighbour(slide_number - 1)
        } else {
            None
        };
        let next = if slide_number < slides.len() {
            neighbour(slide_number + 1)
        } else {
            None
        };

        Self { previous, next }
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }

    /// The `CONTEXT FROM ADJACENT SLIDES` section, or an empty string.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut section = String::from("\n\nCONTEXT FROM ADJACENT SLIDES:\n");
        if let Some((number, text)) = self.previous {
            section.push_str(&format!(
                "\nContent from previous slide (Slide {}):\n---\n{}\n---\n",
                number, text
            ));
        }
        if let Some((number, text)) = self.next {
            section.push_str(&format!(
                "\nContent from next slide (Slide {}):\n---\n{}\n---\n",
                number, text
            ));
        }
        section
    }
}

const INSTRUCTIONS: &str = r#"CORE REQUIREMENTS:

1. COMPREHENSIVE SPEAKER NOTES: Create detailed, precise explanations that help students understand concepts thoroughly. Include:
   - Clear, step-by-step breakdowns of complex ideas
   - Multiple perspectives on the same concept
   - Natural talking points that flow smoothly with the material
   - Connections to prior knowledge and real-world applications
   - Anticipation of common student questions and misconceptions
   - Relevant facts, examples, or explanations that enhance understanding
   - If this slide contains an exercise or activity, provide a complete step-by-step walkthrough with answers

2. ADULT LEARNING PRINCIPLES: Incorporate these principles throughout your notes:
   - SELF-DIRECTED LEARNING: Encourage learners to take ownership and explore further
   - EXPERIENTIAL LEARNING: Connect to learners' existing experiences and knowledge
   - READINESS TO LEARN: Explain why this knowledge is immediately relevant
   - PROBLEM-CENTERED APPROACH: Frame content around solving real problems
   - INTERNAL MOTIVATION: Appeal to intrinsic motivators like mastery and purpose
   - NEED TO KNOW: Clearly establish why learners need this information
   - RESPECT FOR EXPERIENCE: Acknowledge and build upon adult learners' life experiences

3. INDUSTRIAL EXAMPLES: Provide 1-2 fictional but realistic industrial scenarios that demonstrate the concepts in action. Examples should:
   - Be specific and detailed (company names, situations, outcomes)
   - Show both successful applications and potential pitfalls
   - Connect directly to the slide content
   - Be relatable across different industries when possible

4. VISUAL ENHANCEMENTS: If Mermaid.js diagrams would enhance understanding, include them in [MERMAID] tags:
   - Simplify complex processes or relationships
   - Show data flows, organizational structures, or timelines
   - Illustrate cause-and-effect relationships
   - Provide visual memory anchors for key concepts

CRITICAL RESTRICTIONS:
- DO NOT include any greetings, salutations, or welcome messages
- DO NOT reference "Good Morning", "Good Afternoon", or any time-based greetings
- DO NOT include any copyright notices or company references
- DO NOT mention the presenting company or copyright holders
- DO NOT explicitly reference previous or following slides
- Assume this slide builds on established foundation without stating so

INSTRUCTIONAL DESIGN GUIDELINES:
- Use conversational, engaging tone that respects adult learners' intelligence
- Include rhetorical questions to promote reflection
- Suggest interactive elements or discussion points
- Provide clear takeaways and action items
- Connect to broader learning objectives and career applications
- Include timing guidance to maintain pace (e.g., "Spend 2 minutes on this concept")
- Focus on the educational content without meta-commentary about the presentation structure
- For any abbreviations or acronyms provide a lexicon with basic background information
- When possible, attempt to provide first person smooth conversation delivery of content
- Attempt not to repeat content delivered in prior slides in the same context or delivery style
- Search the web for additional data if the slide lacks detail

RESPONSE FORMAT:
Format the response as comprehensive educational content that an instructor can follow while presenting. Structure your response as natural speaker notes that flow smoothly and incorporate all the above principles seamlessly.

Now create comprehensive speaker notes for this slide."#;

/// Build the full prompt for one slide.
pub fn speaker_notes_prompt(
    slide_number: usize,
    slide_text: &str,
    context: &ContextWindow<'_>,
) -> String {
    format!(
        "You are an expert instructional designer and presentation coach specializing in adult education. \
         Create comprehensive educational materials that combine traditional speaker notes with advanced adult learning principles.\n\
         \n\
         SLIDE {} CONTENT:\n\
         {}\n\
         {}\n\
         \n\
         {}",
        slide_number,
        slide_text,
        context.render(),
        INSTRUCTIONS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(texts: &[&str]) -> Vec<SlideRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| SlideRecord::new(i + 1, *t))
            .collect()
    }

    #[test]
    fn test_context_middle_slide() {
        let slides = deck(&["Intro", "Body", "Summary", "Questions"]);
        let context = ContextWindow::around(2, &slides);
        assert_eq!(context.previous, Some((1, "Intro")));
        assert_eq!(context.next, Some((3, "Summary")));
    }

    #[test]
    fn test_context_edges() {
        let slides = deck(&["Intro", "Body", "Summary"]);
        let first = ContextWindow::around(1, &slides);
        assert_eq!(first.previous, None);
        assert_eq!(first.next, Some((2, "Body")));

        let last = ContextWindow::around(3, &slides);
        assert_eq!(last.previous, Some((2, "Body")));
        assert_eq!(last.next, None);
    }

    #[test]
    fn test_context_skips_empty_neighbours() {
        let slides = deck(&["", "Body", ""]);
        let context = ContextWindow::around(2, &slides);
        assert!(context.is_empty());
        assert_eq!(context.render(), "");
    }

    #[test]
    fn test_context_single_slide() {
        let slides = deck(&["Only"]);
        assert!(ContextWindow::around(1, &slides).is_empty());
    }

    #[test]
    fn test_render_context_section() {
        let slides = deck(&["Intro", "Body", "Summary"]);
        let rendered = ContextWindow::around(2, &slides).render();
        assert_eq!(
            rendered,
            "\n\nCONTEXT FROM ADJACENT SLIDES:\n\
             \nContent from previous slide (Slide 1):\n---\nIntro\n---\n\
             \nContent from next slide (Slide 3):\n---\nSummary\n---\n"
        );
    }

    #[test]
    fn test_prompt_includes_slide_and_neighbours_only() {
        let slides = deck(&["One", "Two", "Three", "Four", "Five"]);
        let context = ContextWindow::around(3, &slides);
        let prompt = speaker_notes_prompt(3, "Three", &context);

        assert!(prompt.starts_with("You are an expert instructional designer"));
        assert!(prompt.contains("SLIDE 3 CONTENT:\nThree\n"));
        assert!(prompt.contains("(Slide 2):\n---\nTwo\n---"));
        assert!(prompt.contains("(Slide 4):\n---\nFour\n---"));
        assert!(!prompt.contains("One"));
        assert!(!prompt.contains("Five"));
        assert!(prompt.ends_with("Now create comprehensive speaker notes for this slide."));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = speaker_notes_prompt(1, "Alone", &ContextWindow::default());
        assert!(prompt.contains("SLIDE 1 CONTENT:\nAlone\n\n\nCORE REQUIREMENTS:"));
        assert!(!prompt.contains("CONTEXT FROM ADJACENT SLIDES"));
    }
}
