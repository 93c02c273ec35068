//! Period care panel: the daily log, the cycle calendar, reminder settings and
//! the static self-care content (snacks, recipes, cramp exercises, tips).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlowIntensity(u8);

impl FlowIntensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Very Light",
            2 => "Light",
            3 => "Medium",
            4 => "Heavy",
            _ => "Very Heavy",
        }
    }
}

impl Default for FlowIntensity {
    fn default() -> Self {
        Self(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Irritable,
    Calm,
    Energetic,
    Tired,
    Emotional,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Irritable,
        Mood::Calm,
        Mood::Energetic,
        Mood::Tired,
        Mood::Emotional,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Anxious => "😰",
            Mood::Irritable => "😠",
            Mood::Calm => "😌",
            Mood::Energetic => "⚡",
            Mood::Tired => "😴",
            Mood::Emotional => "🥺",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    Backache,
    BreastTenderness,
    Acne,
    Fatigue,
    Nausea,
}

impl Symptom {
    pub const ALL: [Symptom; 8] = [
        Symptom::Cramps,
        Symptom::Headache,
        Symptom::Bloating,
        Symptom::Backache,
        Symptom::BreastTenderness,
        Symptom::Acne,
        Symptom::Fatigue,
        Symptom::Nausea,
    ];
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symptom::BreastTenderness => f.write_str("Breast Tenderness"),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Accepts the display name in any case, with spaces, dashes or underscores.
impl FromStr for Symptom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Symptom::ALL
            .into_iter()
            .find(|symptom| normalize(&symptom.to_string()) == wanted)
            .ok_or_else(|| format!("unknown symptom '{}'", s))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub flow: FlowIntensity,
    pub mood: Option<Mood>,
    symptoms: Vec<Symptom>,
    pub notes: String,
    pub privacy_mode: bool,
}

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flow(&mut self, level: u8) -> FlowIntensity {
        self.flow = FlowIntensity::new(level);
        self.flow
    }

    pub fn select_mood(&mut self, mood: Mood) {
        self.mood = Some(mood);
    }

    /// Adds the symptom if missing, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_symptom(&mut self, symptom: Symptom) -> bool {
        if let Some(index) = self.symptoms.iter().position(|s| *s == symptom) {
            self.symptoms.remove(index);
            false
        } else {
            self.symptoms.push(symptom);
            true
        }
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn toggle_privacy_mode(&mut self) -> bool {
        self.privacy_mode = !self.privacy_mode;
        self.privacy_mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Period,
    Fertile,
    Pms,
    Regular,
}

impl CyclePhase {
    pub fn label(&self) -> &'static str {
        match self {
            CyclePhase::Period => "Period",
            CyclePhase::Fertile => "Fertile Window",
            CyclePhase::Pms => "PMS",
            CyclePhase::Regular => "Regular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCalendar {
    pub current_day: u32,
    pub cycle_length: u32,
    pub period: RangeInclusive<u32>,
    pub fertile: RangeInclusive<u32>,
    pub pms: RangeInclusive<u32>,
    pub predicted_next_period: String,
}

impl Default for CycleCalendar {
    fn default() -> Self {
        Self {
            current_day: 14,
            cycle_length: 28,
            period: 1..=5,
            fertile: 12..=16,
            pms: 25..=28,
            predicted_next_period: "May 15-20".to_string(),
        }
    }
}

impl CycleCalendar {
    pub fn phase_of(&self, day: u32) -> CyclePhase {
        if self.period.contains(&day) {
            CyclePhase::Period
        } else if self.fertile.contains(&day) {
            CyclePhase::Fertile
        } else if self.pms.contains(&day) {
            CyclePhase::Pms
        } else {
            CyclePhase::Regular
        }
    }

    pub fn current_phase(&self) -> CyclePhase {
        self.phase_of(self.current_day)
    }

    pub fn progress_percent(&self) -> f64 {
        if self.cycle_length == 0 {
            return 0.0;
        }
        self.current_day as f64 / self.cycle_length as f64 * 100.0
    }
}

/// Tabs of the period care panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Track,
    Calendar,
    Symptoms,
    Reminders,
    Tips,
    Talk,
}

impl PanelTab {
    pub const ALL: [PanelTab; 6] = [
        PanelTab::Track,
        PanelTab::Calendar,
        PanelTab::Symptoms,
        PanelTab::Reminders,
        PanelTab::Tips,
        PanelTab::Talk,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Pill,
    PeriodStart,
    Hydration,
    MoodCheckIn,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 4] = [
        ReminderKind::Pill,
        ReminderKind::PeriodStart,
        ReminderKind::Hydration,
        ReminderKind::MoodCheckIn,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReminderKind::Pill => "Pill Reminder",
            ReminderKind::PeriodStart => "Period Start Reminder",
            ReminderKind::Hydration => "Hydration Check-in",
            ReminderKind::MoodCheckIn => "Mood Check-in",
        }
    }

    pub fn schedule(&self) -> &'static str {
        match self {
            ReminderKind::Pill => "Daily at 9:00 AM",
            ReminderKind::PeriodStart => "2 days before predicted start",
            ReminderKind::Hydration => "Every 3 hours during period",
            ReminderKind::MoodCheckIn => "Daily at 7:00 PM",
        }
    }
}

/// On/off switches for the built-in reminders. Period start and hydration are on by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    enabled: [bool; 4],
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: [false, true, true, false],
        }
    }
}

impl ReminderSettings {
    fn slot(kind: ReminderKind) -> usize {
        match kind {
            ReminderKind::Pill => 0,
            ReminderKind::PeriodStart => 1,
            ReminderKind::Hydration => 2,
            ReminderKind::MoodCheckIn => 3,
        }
    }

    pub fn is_enabled(&self, kind: ReminderKind) -> bool {
        self.enabled[Self::slot(kind)]
    }

    /// Flips one switch and returns its new state.
    pub fn toggle(&mut self, kind: ReminderKind) -> bool {
        let slot = &mut self.enabled[Self::slot(kind)];
        *slot = !*slot;
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReminderKind, bool)> + '_ {
        ReminderKind::ALL
            .into_iter()
            .map(|kind| (kind, self.is_enabled(kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareItem {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipSection {
    pub title: &'static str,
    /// `(topic, advice)` pairs.
    pub tips: &'static [(&'static str, &'static str)],
}

pub const HEALTHY_SNACKS: [CareItem; 5] = [
    CareItem { name: "Dark Chocolate", description: "Rich in magnesium and antioxidants" },
    CareItem { name: "Yogurt with Berries", description: "Calcium and antioxidants" },
    CareItem { name: "Nuts and Seeds", description: "Healthy fats and protein" },
    CareItem { name: "Banana with Peanut Butter", description: "Potassium and protein" },
    CareItem { name: "Hummus with Veggies", description: "Protein and fiber" },
];

pub const EASY_RECIPES: [Recipe; 2] = [
    Recipe {
        name: "Chocolate Banana Smoothie",
        ingredients: &["1 banana", "1 tbsp cocoa powder", "1 cup almond milk", "1 tbsp honey", "Ice cubes"],
        instructions: "Blend all ingredients until smooth. Enjoy immediately.",
    },
    Recipe {
        name: "Avocado Toast with Egg",
        ingredients: &[
            "1 slice whole grain bread",
            "1/2 avocado",
            "1 egg",
            "Salt and pepper",
            "Red pepper flakes (optional)",
        ],
        instructions: "Toast bread. Mash avocado and spread on toast. Cook egg as desired (fried or poached recommended). Place egg on top of avocado toast. Season with salt, pepper, and red pepper flakes if desired.",
    },
];

pub const CRAMP_EXERCISES: [CareItem; 4] = [
    CareItem {
        name: "Child's Pose",
        description: "Kneel and sit back on heels, stretch arms forward, rest forehead on floor",
    },
    CareItem {
        name: "Cat-Cow Stretch",
        description: "On hands and knees, alternate between arching and rounding back",
    },
    CareItem {
        name: "Supine Twist",
        description: "Lie on back, bring knees to chest, then lower to one side while keeping shoulders flat",
    },
    CareItem {
        name: "Butterfly Stretch",
        description: "Sit with soles of feet together, knees out to sides, gently press knees down",
    },
];

pub const TIP_SECTIONS: [TipSection; 3] = [
    TipSection {
        title: "Nutrition During Periods",
        tips: &[
            ("Iron-rich foods", "Leafy greens, beans, and lean meats help replenish iron lost during menstruation."),
            ("Calcium", "Dairy products or fortified alternatives can help reduce cramps and mood swings."),
            ("Magnesium", "Dark chocolate, nuts, and seeds may help reduce bloating and cramps."),
            ("Hydration", "Drink plenty of water to reduce bloating and headaches."),
            ("Limit", "Caffeine, alcohol, and salty foods which can worsen symptoms."),
        ],
    },
    TipSection {
        title: "Pain Relief Tips",
        tips: &[
            ("Heat therapy", "Apply a heating pad to your lower abdomen or lower back."),
            ("Gentle massage", "Massage your abdomen in a circular motion with essential oils."),
            ("OTC medication", "Ibuprofen or naproxen can help reduce inflammation and pain."),
            ("Herbal teas", "Ginger, chamomile, or peppermint tea may provide relief."),
            ("Rest", "Give yourself permission to rest when needed."),
        ],
    },
    TipSection {
        title: "Exercise Suggestions",
        tips: &[
            ("Light walking", "Improves circulation and releases endorphins."),
            ("Yoga", "Gentle poses can help relieve tension and cramps."),
            ("Swimming", "Low-impact exercise that can ease discomfort."),
            ("Stretching", "Focus on hip and lower back stretches."),
            ("Listen to your body", "Reduce intensity if needed, it's okay to take it easy."),
        ],
    },
];

/// Recipe lookup for the recipe dialog, by name ignoring case.
pub fn find_recipe(name: &str) -> Option<&'static Recipe> {
    EASY_RECIPES
        .iter()
        .find(|recipe| recipe.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_labels_and_clamping() {
        assert_eq!(FlowIntensity::default().label(), "Light");
        assert_eq!(FlowIntensity::new(0).level(), 1);
        assert_eq!(FlowIntensity::new(9).label(), "Very Heavy");
        let labels: Vec<&str> = (1..=5).map(|l| FlowIntensity::new(l).label()).collect();
        assert_eq!(labels, vec!["Very Light", "Light", "Medium", "Heavy", "Very Heavy"]);
    }

    #[test]
    fn test_toggle_symptom_keeps_selection_order() {
        let mut log = DailyLog::new();
        assert!(log.toggle_symptom(Symptom::Cramps));
        assert!(log.toggle_symptom(Symptom::Fatigue));
        assert!(log.toggle_symptom(Symptom::Acne));
        assert!(!log.toggle_symptom(Symptom::Fatigue));
        assert_eq!(log.symptoms(), &[Symptom::Cramps, Symptom::Acne]);
    }

    #[test]
    fn test_mood_and_privacy() {
        let mut log = DailyLog::new();
        log.select_mood(Mood::Calm);
        assert_eq!(log.mood, Some(Mood::Calm));
        assert_eq!(Mood::Calm.icon(), "😌");
        assert!(log.toggle_privacy_mode());
        assert!(!log.toggle_privacy_mode());
        assert_eq!(Symptom::BreastTenderness.to_string(), "Breast Tenderness");
    }

    #[test]
    fn test_calendar_phases() {
        let calendar = CycleCalendar::default();
        assert_eq!(calendar.phase_of(3), CyclePhase::Period);
        assert_eq!(calendar.phase_of(14), CyclePhase::Fertile);
        assert_eq!(calendar.phase_of(26), CyclePhase::Pms);
        assert_eq!(calendar.phase_of(20), CyclePhase::Regular);
        assert_eq!(calendar.current_phase(), CyclePhase::Fertile);
        assert!((calendar.progress_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mood_and_symptom_parsing() {
        assert_eq!("calm".parse::<Mood>(), Ok(Mood::Calm));
        assert_eq!(" Energetic ".parse::<Mood>(), Ok(Mood::Energetic));
        assert!("grumpy".parse::<Mood>().is_err());

        assert_eq!("breast-tenderness".parse::<Symptom>(), Ok(Symptom::BreastTenderness));
        assert_eq!("Breast Tenderness".parse::<Symptom>(), Ok(Symptom::BreastTenderness));
        assert_eq!("NAUSEA".parse::<Symptom>(), Ok(Symptom::Nausea));
        assert!("fever".parse::<Symptom>().is_err());
    }

    #[test]
    fn test_reminder_defaults_and_toggle() {
        let mut reminders = ReminderSettings::default();
        let enabled: Vec<ReminderKind> = reminders
            .iter()
            .filter(|(_, on)| *on)
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(enabled, vec![ReminderKind::PeriodStart, ReminderKind::Hydration]);

        assert!(reminders.toggle(ReminderKind::Pill));
        assert!(!reminders.toggle(ReminderKind::Hydration));
        assert!(reminders.is_enabled(ReminderKind::Pill));
        assert!(!reminders.is_enabled(ReminderKind::Hydration));
        assert_eq!(ReminderKind::MoodCheckIn.schedule(), "Daily at 7:00 PM");
    }

    #[test]
    fn test_self_care_content() {
        assert_eq!(HEALTHY_SNACKS[0].name, "Dark Chocolate");
        assert_eq!(CRAMP_EXERCISES.len(), 4);
        assert!(TIP_SECTIONS.iter().all(|section| section.tips.len() == 5));

        let smoothie = find_recipe("chocolate banana smoothie").unwrap();
        assert_eq!(smoothie.ingredients.len(), 5);
        assert!(find_recipe("Pancakes").is_none());
        assert_eq!(PanelTab::ALL.len(), 6);
        assert_eq!(PanelTab::default(), PanelTab::Track);
    }
}
