//! Shared fixture: one hundred people.
#![allow(dead_code)]

use std::cell::Cell;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use standout_pager::{
    Condition, FieldKind, MemorySource, OrderBy, Queryable, Record, Schema, Value,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id_person: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: char,
    pub age: i32,
    pub birthday: NaiveDateTime,
}

static PERSON_SCHEMA: Lazy<Schema<Person>> = Lazy::new(|| {
    Schema::<Person>::builder()
        .field("IdPerson", FieldKind::Int, |p| Value::from(p.id_person))
        .field("FirstName", FieldKind::String, |p| Value::from(&p.first_name))
        .field("LastName", FieldKind::String, |p| Value::from(&p.last_name))
        .field("Gender", FieldKind::Char, |p| Value::from(p.gender))
        .field("Age", FieldKind::Int, |p| Value::from(p.age))
        .field("Birthday", FieldKind::DateTime, |p| Value::from(p.birthday))
        .build()
        .expect("valid person schema")
});

impl Record for Person {
    fn schema() -> &'static Schema<Self> {
        &PERSON_SCHEMA
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

pub fn person(id: i64) -> Person {
    let male = id % 2 == 1;
    let age = 20 + id as i32;
    Person {
        id_person: id,
        first_name: format!("Firstname {id}"),
        last_name: format!("Lastname {id}"),
        gender: if male { 'M' } else { 'F' },
        age: if age > 40 { 20 } else { age },
        birthday: if male { date(1988, 10, 20) } else { date(1990, 10, 20) },
    }
}

/// People with `IdPerson` 1 through 100.
pub fn people() -> Vec<Person> {
    (1..=100).map(person).collect()
}

pub fn ids(people: &[&Person]) -> Vec<i64> {
    people.iter().map(|p| p.id_person).collect()
}

/// Wraps a [`MemorySource`] and counts how often records are read.
pub struct CountingSource<'a> {
    inner: MemorySource<'a, Person>,
    reads: &'a Cell<usize>,
}

impl<'a> CountingSource<'a> {
    pub fn new(people: &'a [Person], reads: &'a Cell<usize>) -> Self {
        CountingSource {
            inner: MemorySource::new(people),
            reads,
        }
    }
}

impl<'a> Queryable for CountingSource<'a> {
    type Record = Person;
    type Item = &'a Person;

    fn filter(self, condition: Condition) -> Self {
        CountingSource {
            inner: self.inner.filter(condition),
            reads: self.reads,
        }
    }

    fn order_by(self, order: OrderBy) -> Self {
        CountingSource {
            inner: self.inner.order_by(order),
            reads: self.reads,
        }
    }

    fn count(&self) -> usize {
        self.reads.set(self.reads.get() + 1);
        self.inner.count()
    }

    fn window(&self, skip: usize, take: usize) -> Vec<&'a Person> {
        self.reads.set(self.reads.get() + 1);
        self.inner.window(skip, take)
    }
}
