fn main() -> eyre::Result<()> {
    ntfs_salvage::main()
}
