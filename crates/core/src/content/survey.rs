use crate::model::LearningStyle;

/// Number of questions in the preference survey.
pub const SURVEY_QUESTION_COUNT: usize = 5;

/// One answer choice, tagged with the style it indicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyOption {
    pub id: &'static str,
    pub text: &'static str,
    pub style: LearningStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [SurveyOption; 4],
}

impl SurveyQuestion {
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&SurveyOption> {
        self.options.iter().find(|option| option.id == id)
    }
}

const fn option(id: &'static str, text: &'static str, style: LearningStyle) -> SurveyOption {
    SurveyOption { id, text, style }
}

static SURVEY: [SurveyQuestion; SURVEY_QUESTION_COUNT] = [
    SurveyQuestion {
        id: "q1",
        prompt: "You are helping someone who wants to go to your airport, the center of town or railway station. You would:",
        options: [
            option("a", "Go with her", LearningStyle::Kinesthetic),
            option("b", "Draw, or give her a map", LearningStyle::Visual),
            option("c", "Tell her the directions", LearningStyle::Auditory),
            option("d", "Write down the directions", LearningStyle::Reading),
        ],
    },
    SurveyQuestion {
        id: "q2",
        prompt: "A website has a video showing how to make a special graph. There is a person speaking, some lists and words describing what to do and some diagrams. You would learn most from:",
        options: [
            option("a", "Seeing the diagrams", LearningStyle::Visual),
            option("b", "Listening", LearningStyle::Auditory),
            option("c", "Reading the words", LearningStyle::Reading),
            option("d", "Watching the actions", LearningStyle::Kinesthetic),
        ],
    },
    SurveyQuestion {
        id: "q3",
        prompt: "You want to learn a new program, skill or game on a computer. You would:",
        options: [
            option("a", "Read the written instructions", LearningStyle::Reading),
            option("b", "Talk with people who know about the program", LearningStyle::Auditory),
            option("c", "Use the controls or keyboard", LearningStyle::Kinesthetic),
            option("d", "Follow the diagrams in the book", LearningStyle::Visual),
        ],
    },
    SurveyQuestion {
        id: "q4",
        prompt: "Other than price, what would most influence your decision to buy a new non-fiction book?",
        options: [
            option("a", "The way it looks is appealing", LearningStyle::Visual),
            option("b", "Quickly reading parts of it", LearningStyle::Reading),
            option("c", "A friend talks about it and recommends it", LearningStyle::Auditory),
            option("d", "It has real-life stories, experiences and examples", LearningStyle::Kinesthetic),
        ],
    },
    SurveyQuestion {
        id: "q5",
        prompt: "You have finished a competition or test and would like some feedback. You would like to have feedback:",
        options: [
            option("a", "Using examples from what you have done", LearningStyle::Kinesthetic),
            option("b", "Using a written description of your results", LearningStyle::Reading),
            option("c", "From somebody who talks it through with you", LearningStyle::Auditory),
            option("d", "Using graphs showing what you achieved", LearningStyle::Visual),
        ],
    },
];

/// The fixed survey bank, in presentation order.
#[must_use]
pub fn survey_questions() -> &'static [SurveyQuestion] {
    &SURVEY
}

#[must_use]
pub fn survey_question(id: &str) -> Option<&'static SurveyQuestion> {
    SURVEY.iter().find(|question| question.id == id)
}
