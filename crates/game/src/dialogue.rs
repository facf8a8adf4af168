//! FAQ dialogue scripts and the conversation state machine.
//!
//! A conversation is a tiny three-screen flow: a greeting, a paginated list
//! of questions, and a single answer. Every option index outside the current
//! screen is ignored, so stale clicks and number keys can never wedge the
//! state.

/// Questions shown per page before pagination rows are appended.
pub const QUESTIONS_PER_PAGE: usize = 6;

/// One question/answer pair.
#[derive(Debug, Clone, Copy)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Everything one character can say.
#[derive(Debug, Clone, Copy)]
pub struct DialogueScript {
    pub greeting: &'static str,
    pub greeting_option: &'static str,
    pub faqs: &'static [FaqEntry],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    Greeting,
    Questions { page: usize },
    Answer { question: usize },
}

/// One selectable row on the questions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionEntry {
    Question(usize),
    PrevPage,
    NextPage,
}

/// Conversation state for a single character. Opening a conversation always
/// starts at the greeting.
#[derive(Debug, Clone)]
pub struct DialogueFsm {
    state: DialogueState,
}

impl DialogueFsm {
    pub fn new() -> Self {
        Self {
            state: DialogueState::Greeting,
        }
    }

    pub fn reset(&mut self) {
        self.state = DialogueState::Greeting;
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn total_pages(faq_count: usize) -> usize {
        faq_count.div_ceil(QUESTIONS_PER_PAGE).max(1)
    }

    /// Rows on a question page: the page's questions, then a previous-page
    /// row when there is a page before, then a next-page row when there is
    /// one after. An out-of-range page clamps to the last page.
    pub fn page_entries(faq_count: usize, page: usize) -> Vec<QuestionEntry> {
        let page = page.min(Self::total_pages(faq_count) - 1);
        let start = page * QUESTIONS_PER_PAGE;
        let end = (start + QUESTIONS_PER_PAGE).min(faq_count);
        let mut entries: Vec<QuestionEntry> = (start..end).map(QuestionEntry::Question).collect();
        if page > 0 {
            entries.push(QuestionEntry::PrevPage);
        }
        if page + 1 < Self::total_pages(faq_count) {
            entries.push(QuestionEntry::NextPage);
        }
        entries
    }

    /// Apply a selected option index. Returns true when the screen changed,
    /// false when the index meant nothing on the current screen.
    pub fn handle_option(&mut self, faq_count: usize, option: usize) -> bool {
        match self.state {
            DialogueState::Greeting => {
                if option == 0 {
                    self.state = DialogueState::Questions { page: 0 };
                    true
                } else {
                    false
                }
            }
            DialogueState::Questions { page } => {
                match Self::page_entries(faq_count, page).get(option) {
                    Some(QuestionEntry::Question(q)) => {
                        self.state = DialogueState::Answer { question: *q };
                        true
                    }
                    Some(QuestionEntry::PrevPage) => {
                        self.state = DialogueState::Questions { page: page - 1 };
                        true
                    }
                    Some(QuestionEntry::NextPage) => {
                        self.state = DialogueState::Questions { page: page + 1 };
                        true
                    }
                    None => false,
                }
            }
            DialogueState::Answer { question } => {
                if option == 0 {
                    // Back to the page the question came from.
                    self.state = DialogueState::Questions {
                        page: question / QUESTIONS_PER_PAGE,
                    };
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl Default for DialogueFsm {
    fn default() -> Self {
        Self::new()
    }
}

/// Text for the current screen: body lines plus the selectable options, in
/// option-index order.
#[derive(Debug, Clone)]
pub struct PanelContent {
    pub lines: Vec<String>,
    pub options: Vec<String>,
}

pub fn panel_content(script: &DialogueScript, fsm: &DialogueFsm) -> PanelContent {
    let faq_count = script.faqs.len();
    match fsm.state() {
        DialogueState::Greeting => PanelContent {
            lines: vec![script.greeting.to_owned()],
            options: vec![script.greeting_option.to_owned()],
        },
        DialogueState::Questions { page } => {
            let total = DialogueFsm::total_pages(faq_count);
            let header = if total > 1 {
                format!("Pick a question (page {}/{}):", page + 1, total)
            } else {
                "Pick a question:".to_owned()
            };
            let options = DialogueFsm::page_entries(faq_count, page)
                .iter()
                .map(|entry| match entry {
                    QuestionEntry::Question(q) => script.faqs[*q].question.to_owned(),
                    QuestionEntry::PrevPage => "< Previous page".to_owned(),
                    QuestionEntry::NextPage => "Next page >".to_owned(),
                })
                .collect();
            PanelContent {
                lines: vec![header],
                options,
            }
        }
        DialogueState::Answer { question } => {
            let entry = &script.faqs[question.min(faq_count.saturating_sub(1))];
            PanelContent {
                lines: vec![
                    entry.question.to_owned(),
                    String::new(),
                    entry.answer.to_owned(),
                ],
                options: vec!["< Back to questions".to_owned()],
            }
        }
    }
}

/// The admissions assistant stationed by the entrance hall.
pub const ADMISSIONS_SCRIPT: DialogueScript = DialogueScript {
    greeting: "Hi! I'm Maya, the admissions assistant. Welcome to the campus \
               tour. Ask me anything about studying here.",
    greeting_option: "See frequently asked questions",
    faqs: &[
        FaqEntry {
            question: "What are the admission requirements?",
            answer: "You need a completed secondary education certificate and a \
                     valid ID. Some programs also ask for a short aptitude \
                     interview, which you can book at the front desk.",
        },
        FaqEntry {
            question: "When does enrollment open?",
            answer: "Enrollment for the first semester opens in October and \
                     closes in late December. Mid-year intake runs through \
                     June for selected programs.",
        },
        FaqEntry {
            question: "How much is tuition?",
            answer: "Tuition depends on the program, ranging roughly between \
                     2,400 and 3,800 per year. The admissions office can print \
                     a personalized quote in a few minutes.",
        },
        FaqEntry {
            question: "Is financial aid available?",
            answer: "Yes. State scholarships, merit grants, and installment \
                     plans are all available. Bring your household income \
                     paperwork and we will walk you through the options.",
        },
        FaqEntry {
            question: "Which programs are taught on this campus?",
            answer: "This campus hosts the schools of informatics, design, \
                     business administration, and healthcare technology. Other \
                     programs run at the riverside campus.",
        },
        FaqEntry {
            question: "Are there evening or weekend classes?",
            answer: "Most programs offer an evening section starting at 7 pm, \
                     and a handful run Saturday intensives. Availability varies \
                     by semester, so check the program page.",
        },
        FaqEntry {
            question: "Can I study fully online?",
            answer: "Several business and informatics programs have an online \
                     track with two on-campus lab weeks per semester. The rest \
                     are on-site only.",
        },
        FaqEntry {
            question: "What student benefits are included?",
            answer: "Enrolled students get the transport card discount, free \
                     access to the gym and library, and licenses for the \
                     standard software suites used in class.",
        },
        FaqEntry {
            question: "What are the library opening hours?",
            answer: "The library opens weekdays from 8 am to 10 pm and \
                     Saturdays until 2 pm. During exam weeks it stays open \
                     until midnight.",
        },
        FaqEntry {
            question: "Is there a cafeteria on campus?",
            answer: "Yes, on the ground floor next to the auditorium. It \
                     serves breakfast and lunch menus, and there are microwave \
                     stations for students who bring food.",
        },
        FaqEntry {
            question: "How do I contact the admissions office?",
            answer: "Visit the front desk in this hall, call 600 555 0140, or \
                     write to admissions@campus.example. Replies usually take \
                     one business day.",
        },
    ],
};

/// The lab assistant in the back workshop. Short script, pinned position.
pub const LAB_SCRIPT: DialogueScript = DialogueScript {
    greeting: "Hey, I'm Leo. I run the prototyping lab back here. Curious \
               about the equipment?",
    greeting_option: "See frequently asked questions",
    faqs: &[
        FaqEntry {
            question: "What equipment does the lab have?",
            answer: "Three FDM printers, a laser cutter, a small CNC router, \
                     and a dozen electronics benches with scopes and supplies.",
        },
        FaqEntry {
            question: "Can first-year students use the lab?",
            answer: "Yes, after the two-hour safety induction. Inductions run \
                     every Friday afternoon, no sign-up needed.",
        },
        FaqEntry {
            question: "Do I need to bring my own materials?",
            answer: "Standard filament and copper board are provided for \
                     coursework. Personal projects use the material store at \
                     cost price.",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_leads_to_first_question_page() {
        let mut fsm = DialogueFsm::new();
        assert_eq!(fsm.state(), DialogueState::Greeting);
        assert!(fsm.handle_option(11, 0));
        assert_eq!(fsm.state(), DialogueState::Questions { page: 0 });
    }

    #[test]
    fn invalid_options_never_change_state() {
        let mut fsm = DialogueFsm::new();
        for option in 1..12 {
            assert!(!fsm.handle_option(11, option));
            assert_eq!(fsm.state(), DialogueState::Greeting);
        }
        fsm.handle_option(11, 0);
        // Page 0 of 11 faqs has 6 questions plus the next-page row.
        assert!(!fsm.handle_option(11, 7));
        assert_eq!(fsm.state(), DialogueState::Questions { page: 0 });
    }

    #[test]
    fn pagination_rows_appear_only_where_needed() {
        let page0 = DialogueFsm::page_entries(8, 0);
        assert_eq!(page0.len(), 7);
        assert_eq!(page0[6], QuestionEntry::NextPage);

        let page1 = DialogueFsm::page_entries(8, 1);
        assert_eq!(page1.len(), 3);
        assert_eq!(page1[0], QuestionEntry::Question(6));
        assert_eq!(page1[2], QuestionEntry::PrevPage);

        let single = DialogueFsm::page_entries(3, 0);
        assert_eq!(single.len(), 3);
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_last() {
        assert_eq!(
            DialogueFsm::page_entries(8, 5),
            DialogueFsm::page_entries(8, 1)
        );
        assert_eq!(
            DialogueFsm::page_entries(3, 9),
            DialogueFsm::page_entries(3, 0)
        );
    }

    #[test]
    fn next_and_prev_walk_the_pages() {
        let mut fsm = DialogueFsm::new();
        fsm.handle_option(8, 0);
        assert!(fsm.handle_option(8, 6)); // next
        assert_eq!(fsm.state(), DialogueState::Questions { page: 1 });
        assert!(fsm.handle_option(8, 2)); // prev
        assert_eq!(fsm.state(), DialogueState::Questions { page: 0 });
    }

    #[test]
    fn answer_returns_to_its_own_page() {
        let mut fsm = DialogueFsm::new();
        fsm.handle_option(8, 0);
        fsm.handle_option(8, 6); // page 1
        assert!(fsm.handle_option(8, 0)); // question index 6
        assert_eq!(fsm.state(), DialogueState::Answer { question: 6 });
        assert!(fsm.handle_option(8, 0)); // back
        assert_eq!(fsm.state(), DialogueState::Questions { page: 1 });
    }

    #[test]
    fn answer_ignores_everything_but_back() {
        let mut fsm = DialogueFsm::new();
        fsm.handle_option(3, 0);
        fsm.handle_option(3, 1);
        assert_eq!(fsm.state(), DialogueState::Answer { question: 1 });
        for option in 1..10 {
            assert!(!fsm.handle_option(3, option));
        }
        assert_eq!(fsm.state(), DialogueState::Answer { question: 1 });
    }

    #[test]
    fn content_matches_each_screen() {
        let mut fsm = DialogueFsm::new();
        let content = panel_content(&ADMISSIONS_SCRIPT, &fsm);
        assert_eq!(content.options.len(), 1);

        fsm.handle_option(ADMISSIONS_SCRIPT.faqs.len(), 0);
        let content = panel_content(&ADMISSIONS_SCRIPT, &fsm);
        assert_eq!(content.options.len(), 7);
        assert_eq!(content.options[6], "Next page >");

        fsm.handle_option(ADMISSIONS_SCRIPT.faqs.len(), 1);
        let content = panel_content(&ADMISSIONS_SCRIPT, &fsm);
        assert_eq!(content.lines.len(), 3);
        assert_eq!(content.lines[1], "");
        assert_eq!(content.options[0], "< Back to questions");
    }
}
