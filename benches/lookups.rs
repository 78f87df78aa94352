
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use rand_pcg::Pcg64;

use record_desk::{*};
use record_desk::schemas::contacts::{Contact, ContactBook, name_key};
use record_desk::schemas::library::{Book, Library};

pub fn lookup_benchmark(c: &mut Criterion) {

    //A full contact book, and a full library
    let mut contacts = ContactBook::new().unwrap();
    for idx in 0..contacts.capacity() {
        contacts.insert(Contact::new(&format!("Contact Number {}", idx), "", "")).unwrap();
    }
    let mut library = Library::new().unwrap();
    for idx in 0..library.capacity() {
        library.insert(Book::new(&format!("Volume {}", idx), "Anon")).unwrap();
    }

    let first = name_key("contact number 0");
    let last = name_key("CONTACT NUMBER 99");
    let missing = name_key("Nobody");

    c.bench_function("lookup_contact_first", |b| b.iter(|| black_box( {
        contacts.find(&first)
    })));

    c.bench_function("lookup_contact_last", |b| b.iter(|| black_box( {
        contacts.find(&last)
    })));

    c.bench_function("lookup_contact_missing", |b| b.iter(|| black_box( {
        contacts.find(&missing)
    })));

    let mut rng = Pcg64::seed_from_u64(1);
    let ids : Vec<RecordId> = (0..1000).map(|_| RecordId(rng.gen_range(1..=100))).collect();
    c.bench_function("lookup_book_random_1000", |b| b.iter(|| black_box( {
        ids.iter().filter(|id| library.find(id).is_some()).count()
    })));

    c.bench_function("find_all_titles", |b| b.iter(|| black_box( {
        library.find_all(|book| book.title.as_str().ends_with('7')).count()
    })));
}

criterion_group!(benches, lookup_benchmark);
criterion_main!(benches);
