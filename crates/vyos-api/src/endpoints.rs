// Per-command wrappers.
//
// Each method is a fixed (endpoint, verb) pair forwarded to
// `VyosClient::execute`. Paths that are optional are passed as
// `ConfigPath::Empty`.

use crate::client::VyosClient;
use crate::operation::{Command, Op};
use crate::path::ConfigPath;
use crate::payload::Attachments;
use crate::response::ApiResponse;

impl VyosClient {
    // ── retrieve ─────────────────────────────────────────────────────

    /// Return the configuration subtree under `path` as JSON.
    ///
    /// `POST /retrieve` with `op: showConfig`
    pub async fn retrieve_show_config(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Retrieve, Op::ShowConfig, path).await
    }

    /// Return the values of a multi-value node.
    ///
    /// `POST /retrieve` with `op: returnValues`
    pub async fn retrieve_return_values(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Retrieve, Op::ReturnValues, path).await
    }

    /// Check whether a configuration node exists. `result` is a boolean.
    ///
    /// `POST /retrieve` with `op: exists`
    pub async fn retrieve_exists(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Retrieve, Op::Exists, path).await
    }

    // ── operational mode ─────────────────────────────────────────────

    /// `POST /reset` with `op: reset`
    pub async fn reset(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Reset, Op::Reset, path).await
    }

    /// Run an operational `show` command; `result` is its text output.
    ///
    /// `POST /show` with `op: show`
    pub async fn show(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Show, Op::Show, path).await
    }

    /// `POST /generate` with `op: generate`
    pub async fn generate(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Generate, Op::Generate, path).await
    }

    // ── image ────────────────────────────────────────────────────────

    /// Download and install a system image.
    ///
    /// `POST /image` with `op: add, url`
    pub async fn image_add(&self, url: &str) -> ApiResponse {
        self.execute(
            Command::Image,
            Op::Add,
            &ConfigPath::Empty,
            &Attachments::url(url),
        )
        .await
    }

    /// Remove an installed system image by name.
    ///
    /// `POST /image` with `op: delete, name`
    pub async fn image_delete(&self, name: &str) -> ApiResponse {
        self.execute(
            Command::Image,
            Op::Delete,
            &ConfigPath::Empty,
            &Attachments::name(name),
        )
        .await
    }

    // ── configure ────────────────────────────────────────────────────

    /// Set one location, or a batch of locations in a single commit.
    ///
    /// `POST /configure` with `op: set`
    pub async fn configure_set(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Configure, Op::Set, path).await
    }

    /// Delete one location, or a batch of locations in a single commit.
    ///
    /// `POST /configure` with `op: delete`
    pub async fn configure_delete(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Configure, Op::Delete, path).await
    }

    // ── config-file ──────────────────────────────────────────────────

    /// Save the running configuration, to `file` or the boot config.
    ///
    /// `POST /config-file` with `op: save`
    pub async fn config_file_save(&self, file: Option<&str>) -> ApiResponse {
        let attachments = file.map_or_else(Attachments::none, Attachments::file);
        self.execute(Command::ConfigFile, Op::Save, &ConfigPath::Empty, &attachments)
            .await
    }

    /// Load and commit a configuration file.
    ///
    /// `POST /config-file` with `op: load`
    pub async fn config_file_load(&self, file: &str) -> ApiResponse {
        self.execute(
            Command::ConfigFile,
            Op::Load,
            &ConfigPath::Empty,
            &Attachments::file(file),
        )
        .await
    }

    // ── power ────────────────────────────────────────────────────────

    /// Reboot immediately (`path: ["now"]`).
    pub async fn reboot(&self) -> ApiResponse {
        self.reboot_at(ConfigPath::now()).await
    }

    /// Reboot with an explicit schedule path, e.g. `["at", "23:00"]`.
    ///
    /// `POST /reboot` with `op: reboot`
    pub async fn reboot_at(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Reboot, Op::Reboot, path).await
    }

    /// Power off immediately (`path: ["now"]`).
    pub async fn poweroff(&self) -> ApiResponse {
        self.poweroff_at(ConfigPath::now()).await
    }

    /// `POST /poweroff` with `op: poweroff`
    pub async fn poweroff_at(&self, path: impl Into<ConfigPath>) -> ApiResponse {
        self.path_only(Command::Poweroff, Op::Poweroff, path).await
    }

    async fn path_only(&self, command: Command, op: Op, path: impl Into<ConfigPath>) -> ApiResponse {
        self.execute(command, op, &path.into(), &Attachments::none())
            .await
    }
}
