//! Text normalization and command lookup. Nothing here knows about rooms,
//! items or combat.

/// Synonym table, checked in order. The first entry that matches either the
/// whole input or a prefix followed by a space is applied, once.
const SYNONYMS: &[(&str, &str)] = &[
    ("pick up", "take"),
    ("pickup", "take"),
    ("grab", "take"),
    ("inspect", "examine"),
    ("check", "look"),
    ("view", "look"),
    ("attack", "cast"),
    ("hit", "cast"),
    ("strike", "cast"),
    ("move", "go"),
    ("walk", "go"),
    ("run", "go"),
    ("bag", "inventory"),
    ("items", "inventory"),
    ("save", "quicksave"),
    ("load", "quickload"),
    ("protect", "cast shield"),
    ("heal", "use health_potion"),
    ("drink", "use"),
    ("eat", "use"),
];

const DIRECTIONS: &[(&str, &str)] = &[
    ("north", "north"),
    ("south", "south"),
    ("east", "east"),
    ("west", "west"),
    ("up", "up"),
    ("down", "down"),
    ("n", "north"),
    ("s", "south"),
    ("e", "east"),
    ("w", "west"),
    ("u", "up"),
    ("d", "down"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Go,
    Look,
    Take,
    Use,
    Cast,
    Inventory,
    Status,
    Spells,
    Dodge,
    Solve,
    Quicksave,
    Quickload,
    Help,
    Hint,
    Quit,
}

impl Verb {
    fn lookup(action: &str) -> Option<Verb> {
        let verb = match action {
            "go" => Verb::Go,
            "look" | "examine" | "x" | "l" => Verb::Look,
            "take" | "get" => Verb::Take,
            "use" => Verb::Use,
            "cast" => Verb::Cast,
            "inventory" | "i" => Verb::Inventory,
            "status" => Verb::Status,
            "spells" => Verb::Spells,
            "dodge" => Verb::Dodge,
            "solve" => Verb::Solve,
            "quicksave" => Verb::Quicksave,
            "quickload" => Verb::Quickload,
            "help" => Verb::Help,
            "hint" => Verb::Hint,
            "quit" | "exit" => Verb::Quit,
            _ => return None,
        };
        Some(verb)
    }
}

/// A normalized command: the action token and whatever followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: String,
    pub verb: Option<Verb>,
    pub args: String,
}

impl Command {
    /// Split "item [on|at] target" into (item, target).
    pub fn object_and_target(&self) -> (&str, &str) {
        let args = self.args.trim();
        let (object, rest) = match args.split_once(' ') {
            Some((o, r)) => (o, r.trim()),
            None => (args, ""),
        };
        let target = rest
            .strip_prefix("on ")
            .or_else(|| rest.strip_prefix("at "))
            .map(str::trim)
            .unwrap_or(rest);
        (object, target)
    }
}

/// Lower-case, trim, collapse inner whitespace, then apply at most one
/// synonym substitution.
pub fn normalize(input: &str) -> String {
    let command = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    for (syn, real) in SYNONYMS {
        if command == *syn {
            return real.to_string();
        }
        if let Some(rest) = command.strip_prefix(syn) {
            if rest.starts_with(' ') {
                return format!("{real}{rest}");
            }
        }
    }
    command
}

/// Parse raw input. Returns `None` for blank input.
pub fn parse(input: &str) -> Option<Command> {
    let command = normalize(input);
    if command.is_empty() {
        return None;
    }

    let (action, args) = match command.split_once(' ') {
        Some((a, r)) => (a.to_string(), r.to_string()),
        None => (command.clone(), String::new()),
    };

    if args.is_empty() {
        if let Some((_, dir)) = DIRECTIONS.iter().find(|(word, _)| *word == action) {
            return Some(Command {
                action: "go".to_string(),
                verb: Some(Verb::Go),
                args: dir.to_string(),
            });
        }
    }

    let verb = Verb::lookup(&action);
    let args = if verb == Some(Verb::Go) {
        expand_direction(&args)
    } else {
        args
    };

    Some(Command { action, verb, args })
}

fn expand_direction(word: &str) -> String {
    DIRECTIONS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, dir)| dir.to_string())
        .unwrap_or_else(|| word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> (Option<Verb>, String) {
        let cmd = parse(input).expect("non-empty input");
        (cmd.verb, cmd.args)
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("   TAKE   Tome_Basic  "), "take tome_basic");
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn applies_prefix_and_exact_synonyms() {
        assert_eq!(normalize("pick up herb_rare"), "take herb_rare");
        assert_eq!(normalize("grab mana_potion"), "take mana_potion");
        assert_eq!(normalize("attack guardian"), "cast guardian");
        assert_eq!(normalize("bag"), "inventory");
        assert_eq!(normalize("save"), "quicksave");
        assert_eq!(normalize("heal"), "use health_potion");
    }

    #[test]
    fn synonym_needs_word_boundary() {
        // "items" must not turn "itemsx" into "inventoryx"
        assert_eq!(normalize("itemsx"), "itemsx");
        assert_eq!(normalize("checkpoint"), "checkpoint");
    }

    #[test]
    fn substitution_is_applied_once() {
        // "move" -> "go"; the result is not run through the table again
        assert_eq!(normalize("move run"), "go run");
        // "strike" -> "cast"; a second synonym in the arguments is left alone
        assert_eq!(normalize("strike hit"), "cast hit");
    }

    #[test]
    fn maps_actions_to_verbs() {
        assert_eq!(parsed("examine fireball"), (Some(Verb::Look), "fireball".into()));
        assert_eq!(parsed("x tome_basic"), (Some(Verb::Look), "tome_basic".into()));
        assert_eq!(parsed("walk north"), (Some(Verb::Go), "north".into()));
        assert_eq!(parsed("i"), (Some(Verb::Inventory), String::new()));
        assert_eq!(parsed("dance wildly"), (None, "wildly".into()));
    }

    #[test]
    fn bare_directions_become_go() {
        assert_eq!(parsed("up"), (Some(Verb::Go), "up".into()));
        assert_eq!(parsed("N"), (Some(Verb::Go), "north".into()));
        assert_eq!(parsed("go d"), (Some(Verb::Go), "down".into()));
    }

    #[test]
    fn splits_object_and_target() {
        let cmd = parse("use tower_key on sanctum_door").expect("command");
        assert_eq!(cmd.object_and_target(), ("tower_key", "sanctum_door"));

        let cmd = parse("cast fireball guardian").expect("command");
        assert_eq!(cmd.object_and_target(), ("fireball", "guardian"));

        let cmd = parse("cast shield").expect("command");
        assert_eq!(cmd.object_and_target(), ("shield", ""));
    }
}
