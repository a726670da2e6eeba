#![allow(unused)]

use sieve::{CompiledPredicate, Record};
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Default, Record)]
pub struct Address {
    pub city: String,
    pub zip: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
pub struct Person {
    #[record(rename = "Name")]
    pub name: String,
    #[record(rename = "Age")]
    pub age: i32,
    pub nickname: Option<String>,
    pub address: Option<Address>,
    pub tags: Vec<String>,
    pub scores: Vec<i32>,
    #[record(skip)]
    pub cached_rank: u64,
}

impl Person {
    pub fn new(name: &str, age: i32) -> Self { Self { name: name.to_string(), age, ..Default::default() } }

    pub fn with_address(mut self, city: &str, zip: Option<u32>) -> Self {
        self.address = Some(Address { city: city.to_string(), zip });
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_scores(mut self, scores: &[i32]) -> Self {
        self.scores = scores.to_vec();
        self
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }
}

pub fn people() -> Vec<Person> {
    vec![
        Person::new("Joan", 31).with_address("Lisbon", Some(1100)).with_tags(&["Admin", "ops"]).with_scores(&[1, 2, 3]),
        Person::new("John", 17).with_nickname("Jay").with_scores(&[3, 2, 1]),
        Person::new("Mary", 18).with_address("Porto", None).with_tags(&["ops"]),
        Person::new("joseph", 45).with_nickname("Joe"),
    ]
}

/// Names of the people the predicate keeps, in order.
pub fn matching(predicate: &CompiledPredicate<Person>) -> Vec<String> { predicate.filter(&people()).map(|p| p.name.clone()).collect() }

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::DEBUG).with_test_writer().init(); }
