//! Windows privilege gate: `CheckTokenMembership` against the built-in
//! Administrators group, and elevated relaunch via `ShellExecuteExW`.

use windows::Win32::Foundation::{CloseHandle, WAIT_FAILED};
use windows::Win32::Security::{
    AllocateAndInitializeSid, CheckTokenMembership, FreeSid, PSID, SECURITY_NT_AUTHORITY,
};
use windows::Win32::System::SystemServices::{
    DOMAIN_ALIAS_RID_ADMINS, SECURITY_BUILTIN_DOMAIN_RID,
};
use windows::Win32::System::Threading::{GetExitCodeProcess, INFINITE, WaitForSingleObject};
use windows::Win32::UI::Shell::{
    SEE_MASK_NOASYNC, SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW,
};
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use windows::core::{BOOL, HSTRING, PCWSTR, w};

use super::{Elevation, PrivilegeError};

/// Queries whether the current process token belongs to the built-in
/// Administrators group.
///
/// # Errors
///
/// Returns [`PrivilegeError::Check`] when the SID allocation or the
/// membership query itself fails. That is fatal at startup.
pub fn check() -> Result<Elevation, PrivilegeError> {
    let mut admins_group = PSID::default();

    // SAFETY: we pass the NT authority and two subauthorities identifying
    // BUILTIN\Administrators; the SID is freed below on every path.
    unsafe {
        AllocateAndInitializeSid(
            &SECURITY_NT_AUTHORITY,
            2,
            SECURITY_BUILTIN_DOMAIN_RID as u32,
            DOMAIN_ALIAS_RID_ADMINS as u32,
            0,
            0,
            0,
            0,
            0,
            0,
            &mut admins_group,
        )
    }
    .map_err(PrivilegeError::Check)?;

    let mut is_member = BOOL::default();
    // SAFETY: `None` means the calling thread's token; `admins_group` is
    // the SID allocated above.
    let membership = unsafe { CheckTokenMembership(None, admins_group, &mut is_member) };

    // SAFETY: SID came from AllocateAndInitializeSid.
    let _ = unsafe { FreeSid(admins_group) };

    membership.map_err(PrivilegeError::Check)?;

    if is_member.as_bool() {
        Ok(Elevation::Elevated)
    } else {
        Ok(Elevation::NotElevated)
    }
}

/// Relaunches the current executable elevated, forwarding the original
/// arguments, and waits for the elevated instance to finish.
///
/// Returns the elevated instance's exit code so the unprivileged parent
/// can propagate it.
///
/// # Errors
///
/// Returns [`PrivilegeError::Executable`] when the running binary's path
/// cannot be determined and [`PrivilegeError::Relaunch`] when the UAC
/// launch is refused or the wait on the child fails.
pub fn relaunch_elevated() -> Result<u32, PrivilegeError> {
    let exe = std::env::current_exe().map_err(PrivilegeError::Executable)?;
    let file = HSTRING::from(exe.as_os_str());
    let parameters = HSTRING::from(super::join_arguments(std::env::args().skip(1)));

    #[allow(clippy::cast_possible_truncation)]
    let mut info = SHELLEXECUTEINFOW {
        cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
        fMask: SEE_MASK_NOCLOSEPROCESS | SEE_MASK_NOASYNC,
        lpVerb: w!("runas"),
        lpFile: PCWSTR(file.as_ptr()),
        lpParameters: PCWSTR(parameters.as_ptr()),
        nShow: SW_SHOWNORMAL.0,
        ..Default::default()
    };

    // SAFETY: `info` is fully initialized and the wide strings it points
    // at outlive the call.
    unsafe { ShellExecuteExW(&mut info) }.map_err(PrivilegeError::Relaunch)?;

    // SAFETY: SEE_MASK_NOCLOSEPROCESS hands us the child process handle.
    let wait = unsafe { WaitForSingleObject(info.hProcess, INFINITE) };
    if wait == WAIT_FAILED {
        return Err(PrivilegeError::Relaunch(windows::core::Error::from_win32()));
    }

    let mut code = 0u32;
    // SAFETY: the child has exited, so its exit code is final.
    unsafe { GetExitCodeProcess(info.hProcess, &mut code) }.map_err(PrivilegeError::Relaunch)?;
    // SAFETY: handle owned by us via SEE_MASK_NOCLOSEPROCESS.
    unsafe { CloseHandle(info.hProcess) }.map_err(PrivilegeError::Relaunch)?;

    Ok(code)
}
