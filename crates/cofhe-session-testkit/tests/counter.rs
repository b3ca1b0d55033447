//! End-to-end encrypted counter scenario against the mock stack:
//! initialize, increment, unseal, then encrypt a value and reset to it.

use cofhe_session_core::{Encryptable, Environment, FheType};
use cofhe_session_testkit::{expect_result_value, MockCounter, TestFixture};

#[tokio::test]
async fn counter_increment_and_unseal() {
    let fixture = TestFixture::with_seed([7; 32]);
    if !fixture.harness.is_permitted_environment(Environment::Mock) {
        return;
    }

    fixture.initialize_with_signer().await.unwrap();
    let counter = MockCounter::deploy(fixture.coprocessor.clone());

    // Fresh deployment holds an encrypted zero.
    fixture.harness.expect_plaintext(counter.count(), 0);
    let before = fixture
        .session
        .unseal(counter.count(), FheType::Uint32)
        .await;
    expect_result_value(before, 0);

    fixture
        .harness
        .with_logs("counter.increment", async {
            counter.increment();
        })
        .await;

    fixture.harness.expect_plaintext(counter.count(), 1);
    let after = fixture
        .session
        .unseal(counter.count(), FheType::Uint32)
        .await;
    expect_result_value(after, 1);
}

#[tokio::test]
async fn counter_reset_from_encrypted_input() {
    let fixture = TestFixture::with_seed([7; 32]);
    if !fixture.harness.is_permitted_environment(Environment::Mock) {
        return;
    }

    fixture.initialize_with_signer().await.unwrap();
    let counter = MockCounter::deploy(fixture.coprocessor.clone());

    let inputs = fixture
        .session
        .encrypt(&[Encryptable::uint32(5)])
        .await
        .unwrap();
    assert_eq!(inputs.len(), 1);

    counter.reset(inputs[0]);
    fixture.harness.expect_plaintext(counter.count(), 5);

    let value = fixture
        .session
        .unseal(counter.count(), FheType::Uint32)
        .await;
    expect_result_value(value, 5);
}

#[tokio::test]
async fn unseal_and_encrypt_require_ready_session() {
    use cofhe_session::SessionError;

    let fixture = TestFixture::with_seed([7; 32]);
    let handle = fixture.coprocessor.register(3);

    let unseal = fixture.session.unseal(handle, FheType::Uint32).await;
    assert!(matches!(unseal, Err(SessionError::NotReady(_))));

    let encrypt = fixture.session.encrypt(&[Encryptable::uint32(1)]).await;
    assert!(matches!(encrypt, Err(SessionError::NotReady(_))));
}
