// crates/powerlink-rs-config/src/pi/naming.rs

use super::var::ProcessImageVar;
use alloc::format;
use alloc::vec::Vec;

/// Makes variable names unique within one node.
///
/// Variables sharing module index, module name, direction and variable name
/// form a collision group. Every member, the first included, gets a
/// two-digit suffix (`01`, `02`, ...) in insertion order. The pass repeats
/// until no group is left, in case a suffixed name matches an existing one.
pub fn make_unique_names(vars: &mut [ProcessImageVar]) {
    loop {
        let mut renamed = false;
        for i in 0..vars.len() {
            let group: Vec<usize> = (i..vars.len())
                .filter(|&j| collides(&vars[i], &vars[j]))
                .collect();
            if group.len() < 2 {
                continue;
            }
            for (n, &j) in group.iter().enumerate() {
                if let Some(base) = vars[j].var_name.clone() {
                    vars[j].set_var_name(format!("{}{:02}", base, n + 1));
                }
            }
            renamed = true;
        }
        if !renamed {
            break;
        }
    }
}

fn collides(a: &ProcessImageVar, b: &ProcessImageVar) -> bool {
    a.var_name.is_some()
        && a.var_name == b.var_name
        && a.module_index == b.module_index
        && a.module_name == b.module_name
        && a.direction == b.direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pi::IecDatatype;
    use crate::pi::var::tests::pi_var;
    use crate::types::Direction;
    use alloc::string::String;
    use alloc::vec;

    fn var(module: &str, name: Option<&str>, direction: Direction) -> ProcessImageVar {
        pi_var(1, "6000", module, name, Some(IecDatatype::Usint), 8, direction)
    }

    fn names(vars: &[ProcessImageVar]) -> Vec<String> {
        vars.iter().map(|v| v.field_name()).collect()
    }

    /// Tests that every member of a collision group is suffixed, starting at 01.
    #[test]
    fn test_suffixes_collision_group() {
        let mut vars = vec![
            var("DI", Some("Bit"), Direction::Input),
            var("DI", Some("Bit"), Direction::Input),
            var("DI", Some("Other"), Direction::Input),
            var("DI", Some("Bit"), Direction::Input),
        ];
        make_unique_names(&mut vars);
        assert_eq!(
            names(&vars),
            [
                "CN1_M00_DI_Bit01",
                "CN1_M00_DI_Bit02",
                "CN1_M00_DI_Other",
                "CN1_M00_DI_Bit03"
            ]
        );
        assert_eq!(vars[1].name, "CN1.DI.Bit02");
    }

    #[test]
    fn test_different_direction_is_no_collision() {
        let mut vars = vec![
            var("DI", Some("Bit"), Direction::Input),
            var("DI", Some("Bit"), Direction::Output),
        ];
        make_unique_names(&mut vars);
        assert_eq!(names(&vars), ["CN1_M00_DI_Bit", "CN1_M00_DI_Bit"]);
    }

    /// Tests that a suffixed name colliding with an existing one is resolved too.
    #[test]
    fn test_repeats_until_unique() {
        let mut vars = vec![
            var("DI", Some("Bit01"), Direction::Input),
            var("DI", Some("Bit"), Direction::Input),
            var("DI", Some("Bit"), Direction::Input),
        ];
        make_unique_names(&mut vars);
        let rendered = names(&vars);
        for (i, a) in rendered.iter().enumerate() {
            for b in rendered.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_vars_without_name_untouched() {
        let mut vars = vec![
            var("DI", None, Direction::Input),
            var("DI", None, Direction::Input),
        ];
        make_unique_names(&mut vars);
        assert_eq!(names(&vars), ["CN1_M00_DI", "CN1_M00_DI"]);
    }
}
