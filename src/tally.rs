//! Vote tallying over the bulletin store.

use crate::error::Result;
use crate::model::candidate::CandidateResult;
use crate::store::Stores;

/// Count bulletins per candidate, most votes first.
///
/// The sort is stable, so candidates on equal counts keep their registration
/// order.
pub async fn compute_results(stores: &Stores) -> Result<Vec<CandidateResult>> {
    let candidates = stores.candidates.all().await?;
    let mut results = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let votes = stores.bulletins.count_for(candidate.id).await?;
        results.push(CandidateResult {
            id: candidate.id.into(),
            fullname: candidate.fullname,
            votes,
        });
    }
    results.sort_by(|a, b| b.votes.cmp(&a.votes));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use crate::model::bulletin::Bulletin;

    use super::*;

    #[rocket::async_test]
    async fn results_are_sorted_descending_with_zero_counts_included() {
        let stores = Stores::in_memory();
        let a = stores.candidates.insert("A").await.unwrap();
        let b = stores.candidates.insert("B").await.unwrap();
        let c = stores.candidates.insert("C").await.unwrap();

        for i in 0..3 {
            let bulletin = Bulletin::new(format!("a{i}"), "sig", a.id);
            stores.bulletins.insert(bulletin).await.unwrap();
        }
        for i in 0..5 {
            let bulletin = Bulletin::new(format!("b{i}"), "sig", b.id);
            stores.bulletins.insert(bulletin).await.unwrap();
        }

        let results = compute_results(&stores).await.unwrap();

        let summary: Vec<(&str, u64)> = results
            .iter()
            .map(|r| (r.fullname.as_str(), r.votes))
            .collect();
        assert_eq!(vec![("B", 5), ("A", 3), ("C", 0)], summary);
        assert_eq!(*c.id, **results[2].id);
    }

    #[rocket::async_test]
    async fn ties_keep_registration_order() {
        let stores = Stores::in_memory();
        stores.candidates.insert("First").await.unwrap();
        stores.candidates.insert("Second").await.unwrap();
        stores.candidates.insert("Third").await.unwrap();

        let results = compute_results(&stores).await.unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.fullname.as_str()).collect();
        assert_eq!(vec!["First", "Second", "Third"], names);
    }
}
