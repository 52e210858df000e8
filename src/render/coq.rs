//! Coq script checking that the prover infers every computed join.

use std::fmt::Write;

use crate::error::Result;
use crate::graph::{find_joins, Relation};

/// Unifies an instance of `t1` with an instance of `t2` and checks that the
/// structure inferred for the common instance is `tjoin`.
pub const CHECK_JOIN_TACTIC: &str = r#"Ltac check_join t1 t2 tjoin :=
  let T1 := open_constr:(_ : t1) in
  let T2 := open_constr:(_ : t2) in
  match tt with
  | _ => unify ((id : t1 -> Type) T1) ((id : t2 -> Type) T2)
  | _ => fail "There is no join of" t1 "and" t2
  end;
  let Tjoin :=
    lazymatch T1 with
    | _ (_ ?Tjoin) => constr:(Tjoin)
    | _ ?Tjoin => constr:(Tjoin)
    | ?Tjoin => constr:(Tjoin)
    end
  in
  is_evar Tjoin;
  let tjoin' := type of Tjoin in
  lazymatch tjoin' with
  | tjoin => idtac
  | _ => idtac "Join of" t1 "and" t2 "is" tjoin' "but expected" tjoin
  end."#;

/// Build the verification script for `closure`, importing `libs`.
///
/// Fails without emitting anything when some pair has an ambiguous join.
pub fn render_script(closure: &Relation, libs: &[String]) -> Result<String> {
    let joins = find_joins(closure)?;

    let mut out = String::new();
    out.push_str("(** Generated by hierarchy-graph. Do not edit. **)\n\n");
    for lib in libs {
        let _ = writeln!(out, "Require Import {}.", lib);
    }
    out.push_str("\nSet Implicit Arguments.\n");
    out.push_str("Unset Strict Implicit.\n");
    out.push_str("Unset Printing Implicit Defensive.\n\n");
    out.push_str("Local Arguments id {_} _.\n\n");
    out.push_str(CHECK_JOIN_TACTIC);
    out.push_str("\n\nGoal False.\n");
    for j in &joins {
        let _ = writeln!(
            out,
            "check_join {}.type {}.type {}.type.",
            j.left, j.right, j.join
        );
    }
    out.push_str("Abort.\n");

    log::info!("verification script: {} join checks", joins.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HierarchyError;
    use crate::graph::{close, Triple};

    fn closed(edges: &[(&str, &str, &str)]) -> Relation {
        let triples: Vec<Triple> = edges
            .iter()
            .map(|(f, t, w)| Triple::new(*f, *t, *w))
            .collect();
        close(&Relation::from_triples(&triples))
    }

    #[test]
    fn test_script_lists_imports_and_joins() {
        let closure = closed(&[
            ("GRing.Zmodule", "GRing.Ring", "r"),
            ("GRing.Zmodule", "GRing.Lmodule", "l"),
            ("GRing.Ring", "GRing.Lalgebra", "a"),
            ("GRing.Lmodule", "GRing.Lalgebra", "b"),
        ]);
        let libs = vec![
            "mathcomp.ssreflect.all_ssreflect".to_string(),
            "mathcomp.algebra.all_algebra".to_string(),
        ];
        let script = render_script(&closure, &libs).unwrap();

        let imports = "Require Import mathcomp.ssreflect.all_ssreflect.\n\
                       Require Import mathcomp.algebra.all_algebra.\n";
        assert!(script.contains(imports));
        assert!(script.contains("Ltac check_join"));
        assert!(script.contains(
            "check_join GRing.Ring.type GRing.Lmodule.type GRing.Lalgebra.type.\n"
        ));
        assert!(script.contains(
            "check_join GRing.Lmodule.type GRing.Ring.type GRing.Lalgebra.type.\n"
        ));
        assert!(script.trim_end().ends_with("Abort."));
    }

    #[test]
    fn test_script_one_check_per_join() {
        let closure = closed(&[("L", "J", "lj"), ("R", "J", "rj")]);
        let script = render_script(&closure, &["all".to_string()]).unwrap();
        let checks = script
            .lines()
            .filter(|l| l.starts_with("check_join "))
            .count();
        // (J,L) (J,R) (L,J) (L,R) (R,J) (R,L)
        assert_eq!(checks, 6);
    }

    #[test]
    fn test_script_fails_on_ambiguous_join() {
        let closure = closed(&[
            ("L", "J1", "a"),
            ("L", "J2", "b"),
            ("R", "J1", "c"),
            ("R", "J2", "d"),
        ]);
        let err = render_script(&closure, &["all".to_string()]).unwrap_err();
        assert!(matches!(err, HierarchyError::AmbiguousJoin { .. }));
    }
}
