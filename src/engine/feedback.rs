use crate::engine::output::Output;

/// What a handler did, as far as the feedback steps care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Took(String),
    Cast(String),
    Learned(String),
    Healed,
    Dodged,
    Saved,
    Loaded,
    Status,
    Nothing,
}

type FeedbackStep = fn(&Outcome) -> Option<String>;

/// Applied in order after every handler.
const STEPS: &[FeedbackStep] = &[
    after_take,
    after_move,
    after_cast,
    after_learn,
    after_heal,
    after_dodge,
    after_persist,
    after_status,
];

pub fn apply_feedback(out: &mut Output, outcome: &Outcome) {
    for step in STEPS {
        if let Some(text) = step(outcome) {
            out.hint(text);
        }
    }
}

fn after_take(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Took(item) => Some(format!(
            "Hint: Type <b>inventory</b> to see your items, or <b>use {item}</b> to use it."
        )),
        _ => None,
    }
}

fn after_move(outcome: &Outcome) -> Option<String> {
    matches!(outcome, Outcome::Moved)
        .then(|| "Hint: Type <b>look</b> to examine this new room.".to_string())
}

fn after_cast(outcome: &Outcome) -> Option<String> {
    matches!(outcome, Outcome::Cast(_)).then(|| {
        "Hint: If you defeat the guardian, try <b>go up</b> to continue your ascent.".to_string()
    })
}

fn after_learn(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Learned(spell) => Some(format!(
            "A surge of magical knowledge fills your mind. Try <b>cast {spell}</b> to use your new spell!"
        )),
        _ => None,
    }
}

fn after_heal(outcome: &Outcome) -> Option<String> {
    matches!(outcome, Outcome::Healed)
        .then(|| "Hint: Your health is restored. Check your <b>status</b> if needed.".to_string())
}

fn after_dodge(outcome: &Outcome) -> Option<String> {
    matches!(outcome, Outcome::Dodged)
        .then(|| "Hint: You avoided the hazard! Continue exploring.".to_string())
}

fn after_persist(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Saved => Some("Game progress saved!".to_string()),
        Outcome::Loaded => Some("Game progress loaded!".to_string()),
        _ => None,
    }
}

fn after_status(outcome: &Outcome) -> Option<String> {
    matches!(outcome, Outcome::Status).then(|| {
        "Hint: Use <b>inventory</b> to see your items, <b>spells</b> to see your spells."
            .to_string()
    })
}
