use std::collections::HashSet;

pub const MAX_STAT: i32 = 100;

fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, MAX_STAT)
}

/// The player character. Health and mana stay within `0..=MAX_STAT`, and
/// flags and spells are only ever added; a quickload replaces the whole
/// value instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub current_room: String,
    inventory: Vec<String>,
    health: i32,
    mana: i32,
    flags: HashSet<String>,
    spells: HashSet<String>,
}

impl Player {
    pub fn new(start_room: impl Into<String>) -> Self {
        Player {
            current_room: start_room.into(),
            inventory: Vec::new(),
            health: MAX_STAT,
            mana: MAX_STAT,
            flags: HashSet::new(),
            spells: HashSet::new(),
        }
    }

    /// Rebuild a player from persisted parts, clamping the stats.
    pub fn restore(
        current_room: String,
        inventory: Vec<String>,
        health: i32,
        mana: i32,
        flags: impl IntoIterator<Item = String>,
        spells: impl IntoIterator<Item = String>,
    ) -> Self {
        Player {
            current_room,
            inventory,
            health: clamp_stat(health),
            mana: clamp_stat(mana),
            flags: flags.into_iter().collect(),
            spells: spells.into_iter().collect(),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn adjust_health(&mut self, delta: i32) {
        self.health = clamp_stat(self.health.saturating_add(delta));
    }

    pub fn adjust_mana(&mut self, delta: i32) {
        self.mana = clamp_stat(self.mana.saturating_add(delta));
    }

    pub fn is_fallen(&self) -> bool {
        self.health == 0
    }

    pub fn flags(&self) -> &HashSet<String> {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Returns true if the flag was not already set.
    pub fn set_flag(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    pub fn spells(&self) -> &HashSet<String> {
        &self.spells
    }

    pub fn knows_spell(&self, spell: &str) -> bool {
        self.spells.contains(spell)
    }

    /// Returns true if the spell was new.
    pub fn learn_spell(&mut self, spell: impl Into<String>) -> bool {
        self.spells.insert(spell.into())
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Removes the first copy of `item`; returns false if none was held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_are_clamped() {
        let mut p = Player::new("entrance");
        p.adjust_health(50);
        p.adjust_mana(-250);
        assert_eq!(p.health(), 100);
        assert_eq!(p.mana(), 0);

        p.adjust_health(i32::MIN);
        assert_eq!(p.health(), 0);
        assert!(p.is_fallen());
    }

    #[test]
    fn restore_clamps_out_of_range_values() {
        let p = Player::restore(
            "lobby".into(),
            vec![],
            250,
            -5,
            Vec::<String>::new(),
            Vec::<String>::new(),
        );
        assert_eq!(p.health(), 100);
        assert_eq!(p.mana(), 0);
    }

    #[test]
    fn flags_and_spells_report_novelty() {
        let mut p = Player::new("entrance");
        assert!(p.set_flag("first_entry"));
        assert!(!p.set_flag("first_entry"));
        assert!(p.learn_spell("fireball"));
        assert!(!p.learn_spell("fireball"));
        assert!(p.knows_spell("fireball"));
    }

    #[test]
    fn inventory_keeps_insertion_order() {
        let mut p = Player::new("entrance");
        p.add_item("tome_basic");
        p.add_item("health_potion");
        p.add_item("herb_rare");
        assert!(p.remove_item("health_potion"));
        assert!(!p.remove_item("health_potion"));
        assert_eq!(p.inventory(), ["tome_basic", "herb_rare"]);
    }
}
