use crate::world::{Item, World};

/// Display name for an item id, falling back to the id itself.
pub fn item_name<'a>(world: &'a World, item_id: &'a str) -> &'a str {
    world
        .item(item_id)
        .map(|i| i.name.as_str())
        .unwrap_or(item_id)
}

/// "Fireball Spell" -> "Fireball".
pub fn spell_label(item: &Item) -> &str {
    item.name.strip_suffix(" Spell").unwrap_or(&item.name)
}

pub fn room_name<'a>(world: &'a World, room_id: &'a str) -> &'a str {
    world
        .room(room_id)
        .map(|r| r.name.as_str())
        .unwrap_or(room_id)
}
