use crate::world::Player;

/// A single hint or gate condition.
/// - "flag" / "!flag"
/// - "item:<id>" / "!item:<id>" (held in the inventory)
/// - "spell:<id>" / "!spell:<id>" (known)
#[derive(Debug, PartialEq, Eq)]
pub enum Condition<'a> {
    Flag(&'a str),
    Item(&'a str),
    Spell(&'a str),
}

/// Split a condition into (negated, condition).
pub fn parse_condition(raw: &str) -> (bool, Condition<'_>) {
    let raw = raw.trim();
    let (negated, body) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest.trim()),
        None => (false, raw),
    };

    let cond = if let Some(id) = body.strip_prefix("item:") {
        Condition::Item(id.trim())
    } else if let Some(id) = body.strip_prefix("spell:") {
        Condition::Spell(id.trim())
    } else {
        Condition::Flag(body)
    };

    (negated, cond)
}

pub fn conditions_met(conditions: &[String], player: &Player) -> bool {
    conditions.iter().all(|raw| {
        let (negated, cond) = parse_condition(raw);
        let holds = match cond {
            Condition::Flag(name) => player.has_flag(name),
            Condition::Item(id) => player.has_item(id),
            Condition::Spell(id) => player.knows_spell(id),
        };
        holds != negated
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_prefixes_and_negation() {
        assert_eq!(parse_condition("lobby_cleared"), (false, Condition::Flag("lobby_cleared")));
        assert_eq!(parse_condition("!item:herb_rare"), (true, Condition::Item("herb_rare")));
        assert_eq!(parse_condition("spell:shield"), (false, Condition::Spell("shield")));
    }

    #[test]
    fn all_conditions_must_hold() {
        let mut p = Player::new("garden");
        p.add_item("herb_rare");
        p.set_flag("garden_intro");

        assert!(conditions_met(&conds(&["item:herb_rare", "garden_intro"]), &p));
        assert!(!conditions_met(&conds(&["item:herb_rare", "!garden_intro"]), &p));
        assert!(conditions_met(&conds(&["!spell:shield"]), &p));
        assert!(conditions_met(&[], &p));

        p.learn_spell("shield");
        assert!(!conditions_met(&conds(&["!spell:shield"]), &p));
    }
}
