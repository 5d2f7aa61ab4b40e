//! Delete-cascade: when an engram is removed, every other engram's links
//! to it must go too, or the store ends up with dangling targets.

use cortex_core::models::Engram;

pub fn cascade_unlink<'a>(engrams: impl IntoIterator<Item = &'a mut Engram>, removed_id: &str) {
    for engram in engrams {
        engram.remove_links_to(removed_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::models::EngramMetadata;

    #[test]
    fn cascade_removes_links_pointing_at_the_removed_id() {
        let mut a = Engram::new("a", "c", EngramMetadata::new("test"));
        a.add_link("b", "supports", 0.5);
        a.add_link("c", "supports", 0.5);
        let mut d = Engram::new("d", "c", EngramMetadata::new("test"));
        d.add_link("b", "contradicts", 0.2);

        let mut engrams = vec![a, d];
        cascade_unlink(engrams.iter_mut(), "b");

        assert!(engrams[0].links.iter().all(|l| l.target != "b"));
        assert!(engrams[0].links.iter().any(|l| l.target == "c"));
        assert!(engrams[1].links.is_empty());
    }
}
