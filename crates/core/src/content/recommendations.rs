use crate::model::LearningStyle;

static VISUAL: [&str; 5] = [
    "Use mind maps and visual organizers when studying",
    "Convert text information into charts and diagrams",
    "Use color coding to categorize information",
    "Watch educational videos and visual demonstrations",
    "Create flowcharts for complex processes",
];

static AUDITORY: [&str; 5] = [
    "Record lectures and listen to them multiple times",
    "Participate in group discussions and study groups",
    "Read information out loud to yourself",
    "Use mnemonic devices and verbal repetition",
    "Listen to educational podcasts and audiobooks",
];

static READING: [&str; 5] = [
    "Take detailed written notes during lectures",
    "Rewrite information in your own words",
    "Create outlines and bullet-point summaries",
    "Read multiple sources on the same topic",
    "Use written self-testing and flashcards",
];

static KINESTHETIC: [&str; 5] = [
    "Use hands-on activities and experiments",
    "Take frequent breaks during study sessions",
    "Walk around while reviewing material",
    "Use physical objects and manipulatives",
    "Practice skills through real-world applications",
];

/// Study strategies for a primary style, in presentation order.
#[must_use]
pub fn recommendations(style: LearningStyle) -> &'static [&'static str] {
    match style {
        LearningStyle::Visual => &VISUAL,
        LearningStyle::Auditory => &AUDITORY,
        LearningStyle::Reading => &READING,
        LearningStyle::Kinesthetic => &KINESTHETIC,
    }
}
