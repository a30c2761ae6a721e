use std::collections::HashSet;

/// Wanted packages split by whether the device still has them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetPlan {
    pub to_act: Vec<String>,
    pub already_absent: Vec<String>,
}

impl TargetPlan {
    pub fn is_empty(&self) -> bool {
        self.to_act.is_empty()
    }
}

/// Order follows `wanted`, which is already sorted per profile.
pub fn resolve_targets(wanted: &[&str], installed: &HashSet<String>) -> TargetPlan {
    let (present, absent): (Vec<&str>, Vec<&str>) =
        wanted.iter().copied().partition(|pkg| installed.contains(*pkg));
    TargetPlan {
        to_act: present.into_iter().map(str::to_string).collect(),
        already_absent: absent.into_iter().map(str::to_string).collect(),
    }
}
