use std::collections::{HashMap, HashSet, VecDeque};

use crate::world::World;

/// Breadth-first shortest path over the directed exit graph.
///
/// Exits are expanded in declaration order, so among equally short paths
/// the one through the earliest-declared exits wins. Returns `[source]` when
/// `source == destination` or when no path exists.
pub fn shortest_path(world: &World, source: &str, destination: &str) -> Vec<String> {
    if source == destination || !world.rooms.contains_key(source) {
        return vec![source.to_string()];
    }

    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();

    queue.push_back(source);
    visited.insert(source);

    while let Some(current) = queue.pop_front() {
        if current == destination {
            let mut path = vec![current.to_string()];
            let mut step = current;
            while let Some(prev) = parents.get(step) {
                path.push(prev.to_string());
                step = *prev;
            }
            path.reverse();
            log::trace!("path {} -> {}: {:?}", source, destination, path);
            return path;
        }

        let Some(room) = world.room(current) else {
            continue;
        };
        for exit in &room.exits {
            let next = exit.target.as_str();
            if visited.insert(next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    log::trace!("no path {} -> {}", source, destination);
    vec![source.to_string()]
}
