//! End-to-end assessment scenario: a 50,000-word corpus and a learner with
//! a true productive vocabulary of 8,000 words, assessed under the default
//! budget (15 to 40 items, 1,000-word precision target).

use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use vocab_oracle::{
    Config, RangeBank, ResponseModel, Session, TerminationReason, VocabOracle, VocabScale,
};

const CORPUS: u32 = 50_000;
const TRUE_SIZE: u32 = 8_000;

fn oracle(seed: u64) -> VocabOracle {
    let scale = VocabScale::log_rank(CORPUS, 0.6).unwrap();
    VocabOracle::new(scale, CORPUS)
        .unwrap()
        .config(Config::default().seed(seed))
}

fn run_stochastic(session: &mut Session, bank: &RangeBank, learner_seed: u64) {
    let scale = VocabScale::log_rank(CORPUS, 0.6).unwrap();
    let theta_true = scale.theta_for_size(f64::from(TRUE_SIZE));
    let model = ResponseModel::default();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(learner_seed);
    while !session.is_terminated().0 {
        let Ok(rank) = session.next_item(bank) else { break };
        let p = model.probability_correct(rank, theta_true);
        let correct = Bernoulli::new(p).unwrap().sample(&mut rng);
        session.record_response(rank, correct).unwrap();
    }
}

#[test]
fn default_budget_assessment_recovers_the_learner() {
    // At slope 1.0, 40 items carry at most ~10 units of Fisher information
    // (SE >= 0.32 on theta), so a 1,000-word interval at 8,000 words is out
    // of reach: every session here runs to the item cap, and the check is
    // that the point estimates are accurate anyway. Precision stops are
    // exercised at reachable targets in the simulation suite.
    let trials = 200u64;
    let mut sum = 0.0;
    for trial in 0..trials {
        let oracle = oracle(trial);
        let bank = RangeBank::new(oracle.band_plan().unwrap());
        let mut session = oracle.create_session(None).unwrap();
        run_stochastic(&mut session, &bank, trial.wrapping_add(1));

        let (done, reason) = session.is_terminated();
        assert!(done);
        assert_eq!(
            reason,
            Some(TerminationReason::MaxItems),
            "trial {trial}: stopped after {} items",
            session.items_administered(),
        );
        assert_eq!(session.items_administered(), 40);
        let estimate = session.estimate();
        assert!(estimate.ci_low <= estimate.vocabulary_size);
        assert!(estimate.vocabulary_size <= estimate.ci_high);
        sum += f64::from(estimate.vocabulary_size);
    }
    let mean = sum / trials as f64;
    eprintln!("[scenario] mean={mean:.0} over {trials} max-items sessions");
    assert!(
        mean > 0.85 * f64::from(TRUE_SIZE) && mean < 1.3 * f64::from(TRUE_SIZE),
        "mean estimate {mean:.0} far from true size {TRUE_SIZE}",
    );
}

#[test]
fn deterministic_learner_is_located_accurately() {
    // A learner who knows exactly the 13,333 most frequent words has a
    // productive vocabulary of about 8,000 on this scale (factor 0.6).
    let cut = 13_333u32;
    let oracle = oracle(97);
    let bank = RangeBank::new(oracle.band_plan().unwrap());
    let mut session = oracle.create_session(None).unwrap();
    while !session.is_terminated().0 {
        let Ok(rank) = session.next_item(&bank) else { break };
        session.record_response(rank, rank <= cut).unwrap();
    }
    let estimate = session.estimate();
    assert!(
        (5_000..=12_800).contains(&estimate.vocabulary_size),
        "estimate {} for a {cut}-rank cut",
        estimate.vocabulary_size,
    );
    assert!(estimate.ci_low <= estimate.vocabulary_size);
    assert!(estimate.vocabulary_size <= estimate.ci_high);
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = || {
        let oracle = oracle(1234);
        let bank = RangeBank::new(oracle.band_plan().unwrap());
        let mut session = oracle.create_session(None).unwrap();
        let mut ranks = Vec::new();
        while !session.is_terminated().0 {
            let Ok(rank) = session.next_item(&bank) else { break };
            ranks.push(rank);
            session.record_response(rank, rank <= 13_333).unwrap();
        }
        (ranks, *session.estimate(), session.is_terminated().1)
    };
    assert_eq!(run(), run());
}

#[test]
fn warm_start_resumes_near_the_prior() {
    let oracle = oracle(55);
    let bank = RangeBank::new(oracle.band_plan().unwrap());
    let mut first = oracle.create_session(None).unwrap();
    run_stochastic(&mut first, &bank, 56);
    let prior = *first.estimate();

    let mut resumed = oracle.create_session(Some(prior)).unwrap();
    let first_rank = resumed.next_item(&bank).unwrap();
    // A cold session opens near the scale midpoint (rank ~224); the warm one
    // opens in the prior's neighborhood, thousands of ranks up.
    assert!(
        first_rank > 1_500,
        "warm session opened at rank {first_rank}, prior size {}",
        prior.vocabulary_size,
    );
}
