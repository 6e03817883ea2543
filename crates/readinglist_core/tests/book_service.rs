use readinglist_core::db::open_db_in_memory;
use readinglist_core::{
    prepare_new_book, BookPatch, BookService, BookServiceError, BookValidationError, NewBook,
    SqliteBookRepository,
};
use std::collections::HashSet;

#[test]
fn create_defaults_status_and_list_returns_record_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let created = service.create_book(NewBook::new("Dune", "Herbert")).unwrap();
    assert_eq!(created.title, "Dune");
    assert_eq!(created.author, "Herbert");
    assert_eq!(created.status, "unread");

    assert_eq!(service.list_books().unwrap(), vec![created]);
}

#[test]
fn created_ids_are_unique() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let mut seen = HashSet::new();
    for index in 0..20 {
        let book = service
            .create_book(NewBook::new(format!("Volume {index}"), "Anon"))
            .unwrap();
        assert!(seen.insert(book.id), "id {} was handed out twice", book.id);
    }
    assert_eq!(service.list_books().unwrap().len(), 20);
}

#[test]
fn create_with_missing_fields_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let inputs = [
        NewBook {
            author: Some("Herbert".to_string()),
            ..NewBook::default()
        },
        NewBook {
            title: Some("Dune".to_string()),
            ..NewBook::default()
        },
        NewBook::default(),
        NewBook::new("", "Herbert").with_status("reading"),
    ];

    for input in inputs {
        let err = service.create_book(input).unwrap_err();
        assert!(matches!(err, BookServiceError::Validation(_)));
    }
    assert!(service.list_books().unwrap().is_empty());
}

#[test]
fn create_reports_which_field_is_missing() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let err = service.create_book(NewBook::new("Dune", "")).unwrap_err();
    assert!(matches!(
        err,
        BookServiceError::Validation(BookValidationError::MissingAuthor)
    ));
}

#[test]
fn prepared_drafts_are_persisted_as_validated() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let draft = prepare_new_book(NewBook::new("Dune", "Herbert")).unwrap();
    let created = service.create_draft(&draft).unwrap();
    assert_eq!(created.status, "unread");
    assert_eq!(service.list_books().unwrap(), vec![created]);

    let err = prepare_new_book(NewBook::default()).unwrap_err();
    assert!(matches!(
        err,
        BookServiceError::Validation(BookValidationError::MissingTitle)
    ));
}

#[test]
fn update_maps_missing_row_to_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let err = service
        .update_book(9, &BookPatch::status("finished"))
        .unwrap_err();
    assert!(matches!(err, BookServiceError::NotFound(9)));
}

#[test]
fn status_transitions_are_unconstrained() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let book = service
        .create_book(NewBook::new("Dune", "Herbert").with_status("finished"))
        .unwrap();

    for status in ["unread", "abandoned", "finished", "reading"] {
        let updated = service
            .update_book(book.id, &BookPatch::status(status))
            .unwrap();
        assert_eq!(updated.status, status);
    }
}

#[test]
fn delete_then_list_never_shows_the_book_again() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let book = service.create_book(NewBook::new("Dune", "Herbert")).unwrap();

    service.delete_book(book.id).unwrap();
    assert!(service.get_book(book.id).unwrap().is_none());
    assert!(service.list_books().unwrap().is_empty());

    let err = service.delete_book(book.id).unwrap_err();
    assert!(matches!(err, BookServiceError::NotFound(id) if id == book.id));
}
