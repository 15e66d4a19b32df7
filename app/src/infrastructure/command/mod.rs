mod source;
mod ssh_proxy;

pub use self::{
    source::CommandSource,
    ssh_proxy::{MaybeSsh, SshConfig},
};
