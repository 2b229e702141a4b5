use std::fmt;

use tokio::sync::oneshot;

use crate::common::{ErrorKind, Result};
use crate::core::{Credential, Identity, Registration};

pub(crate) type ResponseSender<Res> = oneshot::Sender<crate::Result<Res>>;
pub(crate) type ResponseReceiver<Res> = oneshot::Receiver<crate::Result<Res>>;

pub(crate) enum UnitOfWork {
    Restore(Work<(), Option<Identity>>),
    Login(Work<Credential, Identity>),
    Register(Work<Registration, Identity>),
    // Authenticated identity to install as the current session.
    Establish(Work<Identity, Identity>),
    Logout(Work<(), ()>),
}

pub(crate) struct Work<Req, Res> {
    pub(crate) request: Req,
    // Wrap with option so that response can be sent via mut reference.
    pub(crate) response_sender: Option<ResponseSender<Res>>,
}

impl<Req, Res> Work<Req, Res> {
    fn new(request: Req) -> (Self, ResponseReceiver<Res>) {
        let (tx, rx) = oneshot::channel();
        (
            Work {
                request,
                response_sender: Some(tx),
            },
            rx,
        )
    }

    pub(crate) fn send_response(&mut self, response: crate::Result<Res>) -> Result<()> {
        self.response_sender
            .take()
            .ok_or_else(|| ErrorKind::Internal("response already sent".to_owned()))?
            .send(response)
            .map_err(|_| ErrorKind::Internal("send to resp channel".to_owned()).into())
    }
}

impl UnitOfWork {
    pub(crate) fn new_restore() -> (UnitOfWork, ResponseReceiver<Option<Identity>>) {
        let (work, rx) = Work::new(());
        (UnitOfWork::Restore(work), rx)
    }

    pub(crate) fn new_login(credential: Credential) -> (UnitOfWork, ResponseReceiver<Identity>) {
        let (work, rx) = Work::new(credential);
        (UnitOfWork::Login(work), rx)
    }

    pub(crate) fn new_register(
        registration: Registration,
    ) -> (UnitOfWork, ResponseReceiver<Identity>) {
        let (work, rx) = Work::new(registration);
        (UnitOfWork::Register(work), rx)
    }

    pub(crate) fn new_logout() -> (UnitOfWork, ResponseReceiver<()>) {
        let (work, rx) = Work::new(());
        (UnitOfWork::Logout(work), rx)
    }

    /// Hand an authenticated identity over to the next middleware,
    /// answering on the sender of the originating login or register.
    pub(crate) fn establish(
        identity: Identity,
        response_sender: Option<ResponseSender<Identity>>,
    ) -> UnitOfWork {
        UnitOfWork::Establish(Work {
            request: identity,
            response_sender,
        })
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnitOfWork::Restore(_) => {
                write!(f, "Restore")
            }
            UnitOfWork::Login(login) => {
                write!(f, "Login email={}", login.request.email())
            }
            UnitOfWork::Register(register) => {
                write!(
                    f,
                    "Register email={} role={}",
                    register.request.email, register.request.role
                )
            }
            UnitOfWork::Establish(establish) => {
                write!(f, "Establish id={}", establish.request.id)
            }
            UnitOfWork::Logout(_) => {
                write!(f, "Logout")
            }
        }
    }
}
