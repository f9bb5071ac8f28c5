//! Protocol conformance tests against captured response fixtures.
//!
//! Each test pre-loads the server side of an in-memory duplex transport
//! with the exact packets a MySQL server would send, drives the connection
//! engine, and asserts both the decoded results and the command bytes the
//! engine put on the wire.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use mysql_client::{Context, Error, Value};
use mysql_protocol::column::FieldType;
use mysql_protocol::flags::{FieldFlags, StatusFlags};

#[tokio::test]
async fn ping_roundtrip() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    conn.ping(&Context::background()).await.unwrap();
    expect_command(&mut server, &[0x0E]).await;
}

#[tokio::test]
async fn exec_reports_affected_rows_and_insert_id() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &ok_payload(3, 7, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    let result = conn
        .exec(&Context::background(), "DELETE FROM t", &[])
        .await
        .unwrap();
    assert_eq!(result.affected_rows, 3);
    assert_eq!(result.last_insert_id, 7);
    expect_command(&mut server, b"\x03DELETE FROM t").await;
}

#[tokio::test]
async fn exec_drains_an_unexpected_result_set() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[
            packet(1, &[0x01]), // one column
            packet(
                2,
                &column_payload("a", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(3, &eof_payload(StatusFlags::AUTOCOMMIT)),
            packet(4, &text_row_payload(&[Some(b"x")])),
            packet(5, &text_row_payload(&[Some(b"y")])),
            packet(6, &eof_payload(StatusFlags::AUTOCOMMIT)),
        ],
    )
    .await;

    // A row-returning statement through exec: everything is discarded, the
    // affected-row count stays zero, and no error surfaces.
    let result = conn
        .exec(&Context::background(), "SELECT a FROM t", &[])
        .await
        .unwrap();
    assert_eq!(result.affected_rows, 0);
    assert_eq!(result.last_insert_id, 0);

    // The connection is still in sync for the next command.
    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;
    conn.ping(&Context::background()).await.unwrap();
}

#[tokio::test]
async fn exec_interpolates_arguments() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &ok_payload(1, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    conn.exec(
        &Context::background(),
        "UPDATE t SET a=? WHERE b=?",
        &[Value::Int(42), Value::Text("o'brien".into())],
    )
    .await
    .unwrap();

    expect_command(&mut server, b"\x03UPDATE t SET a=42 WHERE b='o\\'brien'").await;
}

#[tokio::test]
async fn exec_with_args_and_interpolation_disabled_falls_back() {
    let cfg = mysql_client::Config::new().with_interpolate_params(false);
    let (mut conn, _server) = conn_pair_with_config(cfg);

    let err = conn
        .exec(&Context::background(), "SELECT ?", &[Value::Int(1)])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InterpolationDisabled));
}

#[tokio::test]
async fn query_streams_rows_lazily() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[
            packet(1, &[0x02]),
            packet(
                2,
                &column_payload("id", FieldType::LongLong, 63, FieldFlags::NOT_NULL),
            ),
            packet(
                3,
                &column_payload("name", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(4, &eof_payload(StatusFlags::AUTOCOMMIT)),
            packet(5, &text_row_payload(&[Some(b"1"), Some(b"ada")])),
            packet(6, &text_row_payload(&[Some(b"2"), None])),
            packet(7, &eof_payload(StatusFlags::AUTOCOMMIT)),
        ],
    )
    .await;

    let mut rows = conn
        .query(&Context::background(), "SELECT id, name FROM t", &[])
        .await
        .unwrap();

    assert_eq!(rows.columns().len(), 2);
    assert_eq!(rows.columns()[0].name, "id");
    assert_eq!(rows.columns()[1].type_name(), "VARCHAR");

    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(
        row,
        vec![
            Value::Bytes(bytes::Bytes::from_static(b"1")),
            Value::Bytes(bytes::Bytes::from_static(b"ada")),
        ]
    );

    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row[1], Value::Null);

    assert!(rows.next().await.unwrap().is_none());
    assert!(rows.is_done());
}

#[tokio::test]
async fn query_surfaces_server_errors_and_stays_usable() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &err_payload(1064, "42000", "syntax error"))],
    )
    .await;

    let err = conn
        .query(&Context::background(), "SELEC 1", &[])
        .await
        .unwrap_err();
    match err {
        Error::Server {
            code,
            sql_state,
            message,
        } => {
            assert_eq!(code, 1064);
            assert_eq!(sql_state, "42000");
            assert_eq!(message, "syntax error");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    // A server rejection is recoverable; the connection keeps working.
    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;
    conn.ping(&Context::background()).await.unwrap();
}

#[tokio::test]
async fn empty_leading_result_set_auto_advances() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[
            // First result set: empty, more results follow.
            packet(
                1,
                &ok_payload(
                    0,
                    0,
                    StatusFlags::AUTOCOMMIT | StatusFlags::MORE_RESULTS_EXISTS,
                ),
            ),
            // Second result set: one column, one row.
            packet(2, &[0x01]),
            packet(
                3,
                &column_payload("a", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(4, &eof_payload(StatusFlags::AUTOCOMMIT)),
            packet(5, &text_row_payload(&[Some(b"v")])),
            packet(6, &eof_payload(StatusFlags::AUTOCOMMIT)),
        ],
    )
    .await;

    let mut rows = conn
        .query(&Context::background(), "CALL p()", &[])
        .await
        .unwrap();
    assert_eq!(rows.columns().len(), 1);

    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row[0], Value::Bytes(bytes::Bytes::from_static(b"v")));
    assert!(rows.next().await.unwrap().is_none());
}

#[tokio::test]
async fn lone_empty_result_set_is_terminal() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    let mut rows = conn
        .query(&Context::background(), "SET @x = 1", &[])
        .await
        .unwrap();
    assert!(rows.columns().is_empty());
    assert!(rows.is_done());
    assert!(rows.next().await.unwrap().is_none());
}

#[tokio::test]
async fn multi_result_sets_iterate_explicitly() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[
            packet(1, &[0x01]),
            packet(
                2,
                &column_payload("a", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(
                3,
                &eof_payload(StatusFlags::AUTOCOMMIT),
            ),
            packet(4, &text_row_payload(&[Some(b"first")])),
            packet(
                5,
                &eof_payload(StatusFlags::AUTOCOMMIT | StatusFlags::MORE_RESULTS_EXISTS),
            ),
            packet(6, &[0x01]),
            packet(
                7,
                &column_payload("b", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(8, &eof_payload(StatusFlags::AUTOCOMMIT)),
            packet(9, &text_row_payload(&[Some(b"second")])),
            packet(10, &eof_payload(StatusFlags::AUTOCOMMIT)),
        ],
    )
    .await;

    let mut rows = conn
        .query(&Context::background(), "SELECT a FROM t; SELECT b FROM u", &[])
        .await
        .unwrap();

    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row[0], Value::Bytes(bytes::Bytes::from_static(b"first")));
    assert!(rows.next().await.unwrap().is_none());

    assert!(rows.next_result_set().await.unwrap());
    assert_eq!(rows.columns()[0].name, "b");
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row[0], Value::Bytes(bytes::Bytes::from_static(b"second")));
    assert!(rows.next().await.unwrap().is_none());
    assert!(!rows.next_result_set().await.unwrap());
}

#[tokio::test]
async fn get_system_variable_returns_raw_bytes() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[
            packet(1, &[0x01]),
            packet(
                2,
                &column_payload("@@version", FieldType::VarChar, 45, FieldFlags::empty()),
            ),
            packet(3, &eof_payload(StatusFlags::AUTOCOMMIT)),
            packet(4, &text_row_payload(&[Some(b"8.0.36")])),
            packet(5, &eof_payload(StatusFlags::AUTOCOMMIT)),
        ],
    )
    .await;

    let value = conn
        .get_system_variable(&Context::background(), "version")
        .await
        .unwrap();
    assert_eq!(&value[..], b"8.0.36");
    expect_command(&mut server, b"\x03SELECT @@version").await;
}

#[tokio::test]
async fn out_of_order_sequence_is_fatal() {
    let (mut conn, mut server) = conn_pair();
    // Response stamped with sequence 5 instead of the expected 1.
    script(
        &mut server,
        &[packet(5, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    let err = conn.ping(&Context::background()).await.unwrap_err();
    match err {
        Error::Codec(e) => assert!(e.is_desync()),
        other => panic!("expected desync, got {other:?}"),
    }

    // The connection is poisoned for good.
    assert!(conn.is_closed());
    let err = conn.ping(&Context::background()).await.unwrap_err();
    assert!(matches!(err, Error::BadConnection));
}

#[tokio::test]
async fn transaction_begin_commit() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(
            1,
            &ok_payload(0, 0, StatusFlags::AUTOCOMMIT | StatusFlags::IN_TRANS),
        )],
    )
    .await;

    let tx = conn.begin(&Context::background(), false).await.unwrap();
    expect_command(&mut server, b"\x03START TRANSACTION").await;

    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;
    tx.commit().await.unwrap();
    expect_command(&mut server, b"\x03COMMIT").await;
}

#[tokio::test]
async fn transaction_begin_read_only_rollback() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(
            1,
            &ok_payload(0, 0, StatusFlags::AUTOCOMMIT | StatusFlags::IN_TRANS),
        )],
    )
    .await;

    let tx = conn.begin(&Context::background(), true).await.unwrap();
    expect_command(&mut server, b"\x03START TRANSACTION READ ONLY").await;

    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;
    tx.rollback().await.unwrap();
    expect_command(&mut server, b"\x03ROLLBACK").await;
}

#[tokio::test]
async fn close_sends_quit_and_is_idempotent() {
    let (mut conn, mut server) = conn_pair();
    conn.close().await.unwrap();
    expect_command(&mut server, &[0x01]).await;

    // Second close is a no-op.
    conn.close().await.unwrap();

    let err = conn.ping(&Context::background()).await.unwrap_err();
    assert!(matches!(err, Error::BadConnection));
}

#[tokio::test]
async fn session_params_batch_into_one_set() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
    )
    .await;

    conn.set_session_params(
        &Context::background(),
        &[("sql_mode", "'STRICT_ALL_TABLES'")],
    )
    .await
    .unwrap();
    expect_command(&mut server, b"\x03SET sql_mode='STRICT_ALL_TABLES'").await;
}

#[tokio::test]
async fn charset_candidates_try_until_one_succeeds() {
    let (mut conn, mut server) = conn_pair();
    script(
        &mut server,
        &[packet(1, &err_payload(1115, "42000", "Unknown character set"))],
    )
    .await;

    // First candidate is rejected by the server, second succeeds; the
    // engine needs the second OK pre-loaded before it sends the command.
    let handle = tokio::spawn(async move {
        let mut server = server;
        expect_command(&mut server, b"\x03SET NAMES utf8mb4").await;
        script(
            &mut server,
            &[packet(1, &ok_payload(0, 0, StatusFlags::AUTOCOMMIT))],
        )
        .await;
        expect_command(&mut server, b"\x03SET NAMES utf8").await;
        server
    });

    conn.set_session_params(&Context::background(), &[("charset", "utf8mb4,utf8")])
        .await
        .unwrap();
    handle.await.unwrap();
}
