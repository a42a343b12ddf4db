//! Git reference resolution

use git2::{Commit, Repository};

use crate::error::{Result, git};

/// Resolve a ref name (branch, remote branch, tag, SHA or revspec) to a commit
///
/// Local branches are tried before `origin/<name>`, which is what CI
/// checkouts usually have for the base branch.
pub fn resolve_commit<'a>(repo: &'a Repository, refname: &str) -> Result<Commit<'a>> {
    let ref_candidates = [
        refname.to_string(),
        format!("refs/heads/{refname}"),
        format!("refs/remotes/origin/{refname}"),
        format!("refs/tags/{refname}"),
    ];

    for candidate in &ref_candidates {
        if let Ok(reference) = repo.find_reference(candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    if let Ok(oid) = git2::Oid::from_str(refname) {
        if let Ok(commit) = repo.find_commit(oid) {
            return Ok(commit);
        }
    }

    if let Ok(obj) = repo.revparse_single(refname) {
        if let Ok(commit) = obj.peel_to_commit() {
            return Ok(commit);
        }
    }

    Err(git::ref_resolve_failed(
        refname,
        "Could not resolve reference",
    ))
}
